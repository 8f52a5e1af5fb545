// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-protocol key-value adapter

use super::{Command, KvConnection, KvConnector, KvError, Reply};
use ::redis::aio::MultiplexedConnection;
use ::redis::{RedisError, Value};
use async_trait::async_trait;
use std::time::Duration;
use zgw_core::Endpoint;

/// Deletes KEYS[1] only while it holds ARGV[1]
const COMPARE_AND_DELETE_SCRIPT: &str = r#"if redis.call("get", KEYS[1]) == ARGV[1] then return redis.call("del", KEYS[1]) else return 0 end"#;

/// Connects to a Redis-compatible server
#[derive(Clone, Default)]
pub struct RedisConnector;

impl RedisConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KvConnector for RedisConnector {
    type Connection = RedisConnection;

    async fn connect(
        &self,
        endpoint: &Endpoint,
        timeout: Duration,
    ) -> Result<RedisConnection, KvError> {
        let client = ::redis::Client::open(format!("redis://{endpoint}/"))
            .map_err(|e| KvError::Allocate(e.to_string()))?;

        match tokio::time::timeout(timeout, client.get_multiplexed_async_connection()).await {
            Ok(Ok(conn)) => Ok(RedisConnection { conn }),
            Ok(Err(e)) => Err(KvError::Connect(e.to_string())),
            Err(_) => Err(KvError::Connect(format!(
                "connect to {endpoint} timed out after {timeout:?}"
            ))),
        }
    }
}

/// A live Redis connection
pub struct RedisConnection {
    conn: MultiplexedConnection,
}

#[async_trait]
impl KvConnection for RedisConnection {
    async fn execute(&mut self, command: &Command) -> Result<Reply, KvError> {
        let result: Result<Value, RedisError> = to_redis_cmd(command).query_async(&mut self.conn).await;
        match result {
            Ok(value) => Ok(reply_from_value(value)),
            Err(e) if is_transport_error(&e) => Err(KvError::Transport(e.to_string())),
            Err(e) => Ok(Reply::Error(e.to_string())),
        }
    }
}

fn is_transport_error(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
}

fn to_redis_cmd(command: &Command) -> ::redis::Cmd {
    let mut cmd = ::redis::cmd(command.name());
    match command {
        Command::SetIfAbsent {
            key,
            value,
            ttl_millis,
        } => {
            cmd.arg(key).arg(value).arg("NX").arg("PX").arg(*ttl_millis);
        }
        Command::CompareAndDelete { key, expected } => {
            cmd.arg(COMPARE_AND_DELETE_SCRIPT).arg(1).arg(key).arg(expected);
        }
        Command::SetAdd { key, member } | Command::SetRemove { key, member } => {
            cmd.arg(key).arg(member);
        }
        Command::SetMembers { key } | Command::HashGetAll { key } | Command::Delete { key } => {
            cmd.arg(key);
        }
        Command::HashSetFields { key, fields } => {
            cmd.arg(key);
            for (field, value) in fields {
                cmd.arg(field).arg(value);
            }
        }
    }
    cmd
}

fn reply_from_value(value: Value) -> Reply {
    match value {
        Value::Nil => Reply::Nil,
        Value::Int(n) => Reply::Integer(n),
        Value::Okay => Reply::Status("OK".to_string()),
        Value::SimpleString(s) => Reply::Status(s),
        Value::BulkString(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Reply::Bulk(s),
            Err(_) => Reply::Error("non-utf8 bulk reply".to_string()),
        },
        Value::Array(items) | Value::Set(items) => {
            Reply::Array(items.into_iter().map(reply_from_value).collect())
        }
        // RESP3 servers answer HGETALL with a map; keep the flat token layout
        Value::Map(pairs) => Reply::Array(
            pairs
                .into_iter()
                .flat_map(|(k, v)| [reply_from_value(k), reply_from_value(v)])
                .collect(),
        ),
        other => Reply::Error(format!("unsupported reply: {other:?}")),
    }
}

#[cfg(test)]
#[path = "redis_tests.rs"]
mod tests;

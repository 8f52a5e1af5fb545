// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value store adapters
//!
//! Every backing-store operation is a typed [`Command`]; connections answer with a
//! typed [`Reply`]. An `Err` from [`KvConnection::execute`] always means the
//! transport failed. Error responses from the store arrive as [`Reply::Error`].

mod redis;

pub use self::redis::{RedisConnection, RedisConnector};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeKvConnection, FakeKvConnector, FakeKvStore, KvCall};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use zgw_core::Endpoint;

/// Errors from the key-value transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KvError {
    /// A connection attempt produced a handle, but the handle is unusable
    #[error("connection failed: {0}")]
    Connect(String),
    /// No connection handle could be created at all
    #[error("can't allocate context: {0}")]
    Allocate(String),
    /// The request was sent (or attempted) and no answer came back
    #[error("transport failure: {0}")]
    Transport(String),
}

/// A typed request, one variant per backing-store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set `key` to `value` only if absent, expiring after `ttl_millis`
    SetIfAbsent {
        key: String,
        value: String,
        ttl_millis: u64,
    },
    /// Delete `key` only if it currently holds `expected`; answers 1 or 0
    CompareAndDelete { key: String, expected: String },
    SetAdd { key: String, member: String },
    SetRemove { key: String, member: String },
    SetMembers { key: String },
    HashSetFields {
        key: String,
        fields: Vec<(String, String)>,
    },
    HashGetAll { key: String },
    Delete { key: String },
}

impl Command {
    pub fn set_if_absent(key: impl Into<String>, value: impl Into<String>, ttl_millis: u64) -> Self {
        Self::SetIfAbsent {
            key: key.into(),
            value: value.into(),
            ttl_millis,
        }
    }

    pub fn compare_and_delete(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::CompareAndDelete {
            key: key.into(),
            expected: expected.into(),
        }
    }

    pub fn set_add(key: impl Into<String>, member: impl Into<String>) -> Self {
        Self::SetAdd {
            key: key.into(),
            member: member.into(),
        }
    }

    pub fn set_remove(key: impl Into<String>, member: impl Into<String>) -> Self {
        Self::SetRemove {
            key: key.into(),
            member: member.into(),
        }
    }

    pub fn set_members(key: impl Into<String>) -> Self {
        Self::SetMembers { key: key.into() }
    }

    pub fn hash_set_fields(key: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self::HashSetFields {
            key: key.into(),
            fields,
        }
    }

    pub fn hash_get_all(key: impl Into<String>) -> Self {
        Self::HashGetAll { key: key.into() }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }

    /// Wire verb, used for logging and fault matching
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetIfAbsent { .. } => "SET",
            Self::CompareAndDelete { .. } => "EVAL",
            Self::SetAdd { .. } => "SADD",
            Self::SetRemove { .. } => "SREM",
            Self::SetMembers { .. } => "SMEMBERS",
            Self::HashSetFields { .. } => "HSET",
            Self::HashGetAll { .. } => "HGETALL",
            Self::Delete { .. } => "DEL",
        }
    }

    /// The key this command touches
    pub fn key(&self) -> &str {
        match self {
            Self::SetIfAbsent { key, .. }
            | Self::CompareAndDelete { key, .. }
            | Self::SetAdd { key, .. }
            | Self::SetRemove { key, .. }
            | Self::SetMembers { key }
            | Self::HashSetFields { key, .. }
            | Self::HashGetAll { key }
            | Self::Delete { key } => key,
        }
    }
}

/// A typed store response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Status(String),
    Integer(i64),
    Bulk(String),
    Array(Vec<Reply>),
    /// A well-formed error response from the store
    Error(String),
    Nil,
}

impl Reply {
    pub fn is_ok_status(&self) -> bool {
        matches!(self, Reply::Status(s) if s == "OK")
    }

    /// Flatten an array of string-like elements
    pub fn into_strings(self) -> Option<Vec<String>> {
        match self {
            Reply::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Reply::Bulk(s) | Reply::Status(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Short shape name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Status(_) => "status",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk",
            Reply::Array(_) => "array",
            Reply::Error(_) => "error",
            Reply::Nil => "nil",
        }
    }
}

/// An established connection to the key-value store
#[async_trait]
pub trait KvConnection: Send + 'static {
    async fn execute(&mut self, command: &Command) -> Result<Reply, KvError>;
}

/// Opens connections to the key-value store
#[async_trait]
pub trait KvConnector: Clone + Send + Sync + 'static {
    type Connection: KvConnection;

    async fn connect(
        &self,
        endpoint: &Endpoint,
        timeout: Duration,
    ) -> Result<Self::Connection, KvError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

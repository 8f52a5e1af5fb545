// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake key-value store for testing
//!
//! Several connectors can share one [`FakeKvStore`], which is how tests model
//! multiple client processes contending for the same lock. Expiry follows the
//! store's [`Clock`].
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Command, KvConnection, KvConnector, KvError, Reply};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use zgw_core::{Clock, Endpoint, FakeClock};

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvCall {
    Connect { endpoint: Endpoint },
    Execute(Command),
}

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Set(BTreeSet<String>),
    Hash(BTreeMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

#[derive(Default)]
struct State {
    data: HashMap<String, Entry>,
    calls: Vec<KvCall>,
    /// One-shot responses, matched by command verb
    injected: VecDeque<(&'static str, Result<Reply, KvError>)>,
    connect_failures: VecDeque<KvError>,
    unreachable: bool,
}

/// In-memory key-value store shared by fake connections
#[derive(Clone)]
pub struct FakeKvStore<C: Clock = FakeClock> {
    state: Arc<Mutex<State>>,
    clock: C,
}

impl FakeKvStore<FakeClock> {
    pub fn new() -> Self {
        Self::with_clock(FakeClock::new())
    }
}

impl Default for FakeKvStore<FakeClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FakeKvStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    /// A connector whose connections all talk to this store
    pub fn connector(&self) -> FakeKvConnector<C> {
        FakeKvConnector {
            store: self.clone(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<KvCall> {
        self.lock().calls.clone()
    }

    /// Recorded commands with the given verb
    pub fn executed(&self, verb: &str) -> Vec<Command> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                KvCall::Execute(cmd) if cmd.name() == verb => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn connect_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, KvCall::Connect { .. }))
            .count()
    }

    /// Answer the next command with verb `verb` with `response` instead of executing it
    pub fn inject(&self, verb: &'static str, response: Result<Reply, KvError>) {
        self.lock().injected.push_back((verb, response));
    }

    /// Fail the next connection attempt with `error`
    pub fn fail_next_connect(&self, error: KvError) {
        self.lock().connect_failures.push_back(error);
    }

    /// While unreachable, every connection attempt fails and every command on an
    /// existing connection is a transport failure
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Current string value of `key`
    pub fn get_string(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut state = self.lock();
        purge_expired(&mut state.data, now);
        match state.data.get(key).map(|e| &e.value) {
            Some(Value::Str(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Remaining time before `key` expires, if it has a lease
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        let mut state = self.lock();
        purge_expired(&mut state.data, now);
        state
            .data
            .get(key)
            .and_then(|e| e.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }

    /// Members of the set at `key`
    pub fn members(&self, key: &str) -> BTreeSet<String> {
        match self.lock().data.get(key).map(|e| &e.value) {
            Some(Value::Set(members)) => members.clone(),
            _ => BTreeSet::new(),
        }
    }

    /// Fields of the hash at `key`
    pub fn hash(&self, key: &str) -> Option<BTreeMap<String, String>> {
        match self.lock().data.get(key).map(|e| &e.value) {
            Some(Value::Hash(fields)) => Some(fields.clone()),
            _ => None,
        }
    }

    /// Plant a hash directly, bypassing command recording
    pub fn put_hash(&self, key: &str, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect();
        self.lock().data.insert(
            key.to_string(),
            Entry {
                value: Value::Hash(fields),
                expires_at: None,
            },
        );
    }

    /// Plant a set member directly, bypassing command recording
    pub fn put_member(&self, key: &str, member: &str) {
        let mut state = self.lock();
        let entry = state.data.entry(key.to_string()).or_insert(Entry {
            value: Value::Set(BTreeSet::new()),
            expires_at: None,
        });
        if let Value::Set(members) = &mut entry.value {
            members.insert(member.to_string());
        }
    }

    /// Plant a string directly, bypassing command recording
    pub fn put_string(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| self.clock.now() + ttl);
        self.lock().data.insert(
            key.to_string(),
            Entry {
                value: Value::Str(value.to_string()),
                expires_at,
            },
        );
    }

    fn connect(&self, endpoint: &Endpoint) -> Result<(), KvError> {
        let mut state = self.lock();
        state.calls.push(KvCall::Connect {
            endpoint: endpoint.clone(),
        });
        if let Some(error) = state.connect_failures.pop_front() {
            return Err(error);
        }
        if state.unreachable {
            return Err(KvError::Connect(format!("{endpoint}: connection refused")));
        }
        Ok(())
    }

    fn execute(&self, command: &Command) -> Result<Reply, KvError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.calls.push(KvCall::Execute(command.clone()));

        if let Some(pos) = state
            .injected
            .iter()
            .position(|(verb, _)| *verb == command.name())
        {
            if let Some((_, response)) = state.injected.remove(pos) {
                return response;
            }
        }
        if state.unreachable {
            return Err(KvError::Transport("connection reset by peer".to_string()));
        }

        purge_expired(&mut state.data, now);
        Ok(apply(&mut state.data, command, now))
    }
}

fn purge_expired(data: &mut HashMap<String, Entry>, now: Instant) {
    data.retain(|_, entry| entry.expires_at.is_none_or(|at| at > now));
}

fn apply(data: &mut HashMap<String, Entry>, command: &Command, now: Instant) -> Reply {
    match command {
        Command::SetIfAbsent {
            key,
            value,
            ttl_millis,
        } => {
            if data.contains_key(key) {
                return Reply::Nil;
            }
            data.insert(
                key.clone(),
                Entry {
                    value: Value::Str(value.clone()),
                    expires_at: Some(now + Duration::from_millis(*ttl_millis)),
                },
            );
            Reply::Status("OK".to_string())
        }
        Command::CompareAndDelete { key, expected } => match data.get(key).map(|e| &e.value) {
            Some(Value::Str(current)) if current == expected => {
                data.remove(key);
                Reply::Integer(1)
            }
            Some(Value::Str(_)) | None => Reply::Integer(0),
            Some(_) => Reply::Error(WRONGTYPE.to_string()),
        },
        Command::SetAdd { key, member } => {
            let entry = data.entry(key.clone()).or_insert(Entry {
                value: Value::Set(BTreeSet::new()),
                expires_at: None,
            });
            match &mut entry.value {
                Value::Set(members) => Reply::Integer(i64::from(members.insert(member.clone()))),
                _ => Reply::Error(WRONGTYPE.to_string()),
            }
        }
        Command::SetRemove { key, member } => {
            let (removed, now_empty) = match data.get_mut(key).map(|e| &mut e.value) {
                Some(Value::Set(members)) => (members.remove(member), members.is_empty()),
                Some(_) => return Reply::Error(WRONGTYPE.to_string()),
                None => (false, false),
            };
            if now_empty {
                data.remove(key);
            }
            Reply::Integer(i64::from(removed))
        }
        Command::SetMembers { key } => match data.get(key).map(|e| &e.value) {
            Some(Value::Set(members)) => {
                Reply::Array(members.iter().cloned().map(Reply::Bulk).collect())
            }
            Some(_) => Reply::Error(WRONGTYPE.to_string()),
            None => Reply::Array(Vec::new()),
        },
        Command::HashSetFields { key, fields } => {
            if fields.is_empty() {
                return Reply::Error("ERR wrong number of arguments for 'hset' command".to_string());
            }
            let entry = data.entry(key.clone()).or_insert(Entry {
                value: Value::Hash(BTreeMap::new()),
                expires_at: None,
            });
            match &mut entry.value {
                Value::Hash(hash) => {
                    let added = fields
                        .iter()
                        .filter(|(f, v)| hash.insert(f.clone(), v.clone()).is_none())
                        .count();
                    Reply::Integer(i64::try_from(added).unwrap_or(i64::MAX))
                }
                _ => Reply::Error(WRONGTYPE.to_string()),
            }
        }
        Command::HashGetAll { key } => match data.get(key).map(|e| &e.value) {
            Some(Value::Hash(hash)) => Reply::Array(
                hash.iter()
                    .flat_map(|(f, v)| [Reply::Bulk(f.clone()), Reply::Bulk(v.clone())])
                    .collect(),
            ),
            Some(_) => Reply::Error(WRONGTYPE.to_string()),
            None => Reply::Array(Vec::new()),
        },
        Command::Delete { key } => Reply::Integer(i64::from(data.remove(key).is_some())),
    }
}

/// Connector handing out connections to a shared [`FakeKvStore`]
#[derive(Clone)]
pub struct FakeKvConnector<C: Clock = FakeClock> {
    store: FakeKvStore<C>,
}

impl<C: Clock> FakeKvConnector<C> {
    pub fn store(&self) -> &FakeKvStore<C> {
        &self.store
    }
}

#[async_trait]
impl<C: Clock> KvConnector for FakeKvConnector<C> {
    type Connection = FakeKvConnection<C>;

    async fn connect(
        &self,
        endpoint: &Endpoint,
        _timeout: Duration,
    ) -> Result<FakeKvConnection<C>, KvError> {
        self.store.connect(endpoint)?;
        Ok(FakeKvConnection {
            store: self.store.clone(),
        })
    }
}

/// A connection to a [`FakeKvStore`]
pub struct FakeKvConnection<C: Clock = FakeClock> {
    store: FakeKvStore<C>,
}

#[async_trait]
impl<C: Clock> KvConnection for FakeKvConnection<C> {
    async fn execute(&mut self, command: &Command) -> Result<Reply, KvError> {
        self.store.execute(command)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

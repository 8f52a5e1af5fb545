// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classification of backing-store responses
//!
//! Every response is classified at its call site as success, a transient I/O
//! failure, or a logic/corruption failure. Classification is a pure function of the
//! response; side effects (invalidating the connection, releasing the lock) are
//! applied by whoever escalates the failure.

use crate::connection::Connection;
use tracing::warn;
use zgw_adapters::{Command, KvConnector, KvError, Reply};
use zgw_core::StoreError;

/// Classified result of one backing-store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Reply),
    /// No response, or the transport failed
    TransientIo(String),
    /// The store answered with an error, or with something that breaks the protocol
    LogicOrCorruption(String),
}

/// Whether the failing operation held the directory lock at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockHeld {
    Yes,
    No,
}

impl Outcome {
    /// Classify the raw result of the call named `op`
    pub fn of(op: &str, result: Result<Reply, KvError>) -> Self {
        match result {
            Ok(Reply::Error(msg)) => Outcome::LogicOrCorruption(format!("{op} ret: {msg}")),
            Ok(reply) => Outcome::Success(reply),
            Err(e) => Outcome::TransientIo(format!("{op}: {e}")),
        }
    }

    /// Only logic failures under the lock release it. After a transport failure
    /// the release would fail too, so the lease is left to expire.
    pub fn must_release_lock(&self, held: LockHeld) -> bool {
        matches!(self, Outcome::LogicOrCorruption(_)) && held == LockHeld::Yes
    }
}

/// A failure that already went through the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    Io(String),
    Logic(String),
}

impl Failure {
    pub(crate) fn logic(msg: impl Into<String>) -> Self {
        Failure::Logic(msg.into())
    }

    pub(crate) fn unexpected(op: &str, reply: &Reply) -> Self {
        Failure::Logic(format!("{op}: unexpected {} reply", reply.kind()))
    }

    pub(crate) fn outcome(&self) -> Outcome {
        match self {
            Failure::Io(msg) => Outcome::TransientIo(msg.clone()),
            Failure::Logic(msg) => Outcome::LogicOrCorruption(msg.clone()),
        }
    }

    /// Convert to the caller-visible error for a call made without the lock
    pub(crate) fn escalate<K: KvConnector>(self, conn: &mut Connection<K>) -> StoreError {
        match self {
            Failure::Io(msg) => {
                conn.invalidate();
                StoreError::Io(msg)
            }
            Failure::Logic(msg) => {
                warn!(error = %msg, "backing store rejected request");
                StoreError::Corruption(msg)
            }
        }
    }
}

/// Execute one command and classify the outcome
pub(crate) async fn run<K: KvConnector>(
    conn: &mut Connection<K>,
    op: &str,
    command: &Command,
) -> Result<Reply, Failure> {
    match Outcome::of(op, conn.execute(command).await) {
        Outcome::Success(reply) => Ok(reply),
        Outcome::TransientIo(msg) => Err(Failure::Io(msg)),
        Outcome::LogicOrCorruption(msg) => Err(Failure::Logic(msg)),
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory lock: a leased, identity-checked key in the backing store
//!
//! Acquire is an atomic set-if-absent with expiry, polled at a fixed interval while
//! another holder owns the key. Release is an atomic compare-and-delete, so a client
//! whose lease already ran out cannot delete a newer holder's lock.

use crate::classify::{Failure, LockHeld, Outcome};
use crate::connection::Connection;
use tracing::{debug, info, warn};
use zgw_adapters::{Command, KvConnector, Reply};
use zgw_core::{CancelToken, Clock, HolderId, LockConfig, StoreError};

/// Result of a release that reached the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// This client held the lock and deleted it
    Released,
    /// The key was absent or held by someone else; nothing was deleted
    NotHeld,
}

impl std::fmt::Display for ReleaseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseOutcome::Released => write!(f, "released"),
            ReleaseOutcome::NotHeld => write!(f, "not held"),
        }
    }
}

/// Acquires and releases the directory lock on behalf of one client
pub struct LockCoordinator<C: Clock> {
    config: LockConfig,
    clock: C,
}

impl<C: Clock> LockCoordinator<C> {
    pub fn new(config: LockConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn holder(&self) -> &HolderId {
        &self.config.holder
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Block until this client holds the lock.
    ///
    /// Retries without bound while the lock is contended; `cancel` is checked before
    /// every attempt. Transport failures end the wait immediately.
    pub async fn acquire<K: KvConnector>(
        &self,
        conn: &mut Connection<K>,
        cancel: &CancelToken,
    ) -> Result<(), StoreError> {
        let command = Command::set_if_absent(
            self.config.key.clone(),
            self.config.holder.as_str(),
            self.config.lease_millis(),
        );
        let mut attempts: u64 = 0;

        loop {
            if cancel.is_cancelled() {
                debug!(key = %self.config.key, attempts, "lock wait cancelled");
                return Err(StoreError::Cancelled(format!(
                    "Lock: gave up after {attempts} attempts"
                )));
            }
            if !conn.ensure_healthy().await {
                return Err(StoreError::io("Reconnect"));
            }

            attempts += 1;
            match Outcome::of("Lock", conn.execute(&command).await) {
                Outcome::Success(reply) if reply.is_ok_status() => {
                    info!(key = %self.config.key, holder = %self.config.holder, attempts, "lock acquired");
                    return Ok(());
                }
                Outcome::Success(Reply::Nil) => {
                    debug!(key = %self.config.key, attempts, "lock contended, retrying");
                }
                Outcome::Success(reply) => {
                    return Err(Failure::unexpected("Lock", &reply).escalate(conn));
                }
                Outcome::TransientIo(msg) => return Err(Failure::Io(msg).escalate(conn)),
                Outcome::LogicOrCorruption(msg) => {
                    return Err(Failure::Logic(msg).escalate(conn));
                }
            }

            self.clock.sleep(self.config.retry_interval).await;
        }
    }

    /// Delete the lock if, and only if, this client still holds it
    pub async fn release<K: KvConnector>(
        &self,
        conn: &mut Connection<K>,
    ) -> Result<ReleaseOutcome, StoreError> {
        if !conn.ensure_healthy().await {
            return Err(StoreError::io("Reconnect"));
        }

        let command =
            Command::compare_and_delete(self.config.key.clone(), self.config.holder.as_str());
        match Outcome::of("UnLock", conn.execute(&command).await) {
            Outcome::Success(Reply::Integer(1)) => {
                info!(key = %self.config.key, holder = %self.config.holder, "lock released");
                Ok(ReleaseOutcome::Released)
            }
            Outcome::Success(Reply::Integer(0)) => {
                // Lease expired, possibly re-acquired by another client
                warn!(key = %self.config.key, holder = %self.config.holder, "lock not held at release");
                Ok(ReleaseOutcome::NotHeld)
            }
            Outcome::Success(reply) => Err(Failure::unexpected("UnLock", &reply).escalate(conn)),
            Outcome::TransientIo(msg) => Err(Failure::Io(msg).escalate(conn)),
            Outcome::LogicOrCorruption(msg) => Err(Failure::Logic(msg).escalate(conn)),
        }
    }

    /// Turn a failure that happened under the lock into the caller-visible error.
    ///
    /// Logic failures release the lock first and report how that went; transport
    /// failures leave the lock to its lease.
    pub(crate) async fn abort<K: KvConnector>(
        &self,
        conn: &mut Connection<K>,
        failure: Failure,
    ) -> StoreError {
        if !failure.outcome().must_release_lock(LockHeld::Yes) {
            return failure.escalate(conn);
        }

        let released = match self.release(conn).await {
            Ok(outcome) => outcome.to_string(),
            Err(e) => e.to_string(),
        };
        match failure.escalate(conn) {
            StoreError::Corruption(msg) => {
                StoreError::Corruption(format!("{msg}, UnLock ret: {released}"))
            }
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock identity and lease configuration
//!
//! The directory lock is a single named key in the backing store. Whoever stores
//! their [`HolderId`] in it owns the lock until they release it or the lease runs out.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default key holding the current lock holder
pub const DEFAULT_LOCK_KEY: &str = "zgw_lock";
/// Default lease before the store expires an unreleased lock
pub const DEFAULT_LEASE: Duration = Duration::from_secs(10);
/// Default polling interval while the lock is contended
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// Unique identifier for a lock holder
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(pub String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lock configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Key the lock lives under
    pub key: String,
    /// Identity written into the key while this client holds the lock
    pub holder: HolderId,
    /// How long the store keeps the lock if it is never released
    #[serde(with = "humantime_serde")]
    pub lease: Duration,
    /// How long to wait between attempts while another holder owns the lock
    #[serde(with = "humantime_serde")]
    pub retry_interval: Duration,
}

impl LockConfig {
    pub fn new(holder: HolderId) -> Self {
        Self {
            key: DEFAULT_LOCK_KEY.to_string(),
            holder,
            lease: DEFAULT_LEASE,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_lease(mut self, lease: Duration) -> Self {
        self.lease = lease;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Lease in whole milliseconds, as the store expects it
    pub fn lease_millis(&self) -> u64 {
        u64::try_from(self.lease.as_millis()).unwrap_or(u64::MAX)
    }

    /// Reject configurations that would cause spurious contention or unusable keys
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.key.is_empty() {
            return Err(StoreError::invalid_argument("lock key must not be empty"));
        }
        if self.holder.as_str().is_empty() {
            return Err(StoreError::invalid_argument(
                "lock identity must not be empty",
            ));
        }
        if self.lease_millis() == 0 {
            return Err(StoreError::invalid_argument(
                "lock lease must be at least 1ms",
            ));
        }
        if self.lease <= self.retry_interval {
            return Err(StoreError::invalid_argument(format!(
                "lock lease ({:?}) must exceed the retry interval ({:?})",
                self.lease, self.retry_interval
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

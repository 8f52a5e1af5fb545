// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File configuration for a metadata store client
//!
//! ```toml
//! cluster_addrs = ["127.0.0.1:9221"]
//! kv_addr = "127.0.0.1:6379"
//!
//! [lock]
//! identity = "gw-node-1"
//! lease = "10s"
//! ```

use crate::id::{IdGen, UuidIdGen};
use crate::lock::{HolderId, LockConfig, DEFAULT_LEASE, DEFAULT_LOCK_KEY, DEFAULT_RETRY_INTERVAL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Connect timeout for the key-value store
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(1500);

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level client configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Meta nodes of the data cluster, `host:port`
    #[serde(default)]
    pub cluster_addrs: Vec<String>,
    /// Key-value store, `host:port`
    #[serde(default)]
    pub kv_addr: String,
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(default)]
    pub lock: LockSettings,
}

/// `[lock]` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockSettings {
    #[serde(default = "default_lock_key")]
    pub key: String,
    /// Holder identity; a random one is generated when absent
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default = "default_lease", with = "humantime_serde")]
    pub lease: Duration,
    #[serde(default = "default_retry_interval", with = "humantime_serde")]
    pub retry_interval: Duration,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            key: default_lock_key(),
            identity: None,
            lease: DEFAULT_LEASE,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl LockSettings {
    /// Resolve into a lock configuration, generating an identity if none is set
    pub fn to_lock_config(&self, ids: &impl IdGen) -> LockConfig {
        let holder = match &self.identity {
            Some(id) => HolderId::new(id.clone()),
            None => ids.next(),
        };
        LockConfig::new(holder)
            .with_key(self.key.clone())
            .with_lease(self.lease)
            .with_retry_interval(self.retry_interval)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cluster_addrs: Vec::new(),
            kv_addr: String::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            lock: LockSettings::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(cluster_addrs: Vec<String>, kv_addr: impl Into<String>) -> Self {
        Self {
            cluster_addrs,
            kv_addr: kv_addr.into(),
            ..Self::default()
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.lock.identity = Some(identity.into());
        self
    }

    pub fn with_lease(mut self, lease: Duration) -> Self {
        self.lock.lease = lease;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.lock.retry_interval = interval;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Lock configuration with a random identity when none is configured
    pub fn lock_config(&self) -> LockConfig {
        self.lock.to_lock_config(&UuidIdGen)
    }
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

fn default_lock_key() -> String {
    DEFAULT_LOCK_KEY.to_string()
}

fn default_lease() -> Duration {
    DEFAULT_LEASE
}

fn default_retry_interval() -> Duration {
    DEFAULT_RETRY_INTERVAL
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

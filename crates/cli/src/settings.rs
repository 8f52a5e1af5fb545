// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration resolution: file values first, command-line flags on top

use crate::error::CliError;
use std::path::Path;
use std::time::Duration;
use zgw_core::StoreConfig;

/// Values given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub cluster: Vec<String>,
    pub kv: Option<String>,
    pub identity: Option<String>,
    pub lease: Option<Duration>,
}

/// Load `path` (if any) and apply `overrides`.
///
/// Addresses are not validated here; opening the store does that.
pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<StoreConfig, CliError> {
    let mut config = match path {
        Some(path) => StoreConfig::load(path).map_err(|e| {
            CliError::new(format!("cannot load configuration from {}", path.display()))
                .with_context(e.to_string())
                .with_suggestion("Check the file exists and is valid TOML")
                .with_suggestion("Show the effective settings: zgw config")
                .with_source(e)
        })?,
        None => StoreConfig::default(),
    };

    if !overrides.cluster.is_empty() {
        config.cluster_addrs = overrides.cluster;
    }
    if let Some(kv) = overrides.kv {
        config.kv_addr = kv;
    }
    if let Some(identity) = overrides.identity {
        config.lock.identity = Some(identity);
    }
    if let Some(lease) = overrides.lease {
        config.lock.lease = lease;
    }
    Ok(config)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

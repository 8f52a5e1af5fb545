// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config command

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use zgw_core::StoreConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Effective settings after file and flags are merged
#[derive(Serialize)]
struct ConfigView {
    cluster_addrs: Vec<String>,
    kv_addr: String,
    connect_timeout: String,
    lock_key: String,
    identity: Option<String>,
    lease: String,
    retry_interval: String,
}

impl From<&StoreConfig> for ConfigView {
    fn from(config: &StoreConfig) -> Self {
        Self {
            cluster_addrs: config.cluster_addrs.clone(),
            kv_addr: config.kv_addr.clone(),
            connect_timeout: humantime::format_duration(config.connect_timeout).to_string(),
            lock_key: config.lock.key.clone(),
            identity: config.lock.identity.clone(),
            lease: humantime::format_duration(config.lock.lease).to_string(),
            retry_interval: humantime::format_duration(config.lock.retry_interval).to_string(),
        }
    }
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cluster:         {}", self.cluster_addrs.join(", "))?;
        writeln!(f, "kv:              {}", self.kv_addr)?;
        writeln!(f, "connect timeout: {}", self.connect_timeout)?;
        writeln!(f, "lock key:        {}", self.lock_key)?;
        writeln!(
            f,
            "identity:        {}",
            self.identity.as_deref().unwrap_or("<random>")
        )?;
        writeln!(f, "lease:           {}", self.lease)?;
        write!(f, "retry interval:  {}", self.retry_interval)
    }
}

pub fn handle(config: &StoreConfig, args: ConfigArgs) -> Result<()> {
    println!("{}", output::render(&ConfigView::from(config), args.format)?);
    Ok(())
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod user;

use crate::error::CliError;
use zgw_adapters::{RedisConnector, TcpClusterAdapter, TracedClusterAdapter, TracedKvConnector};
use zgw_core::{StoreConfig, SystemClock};
use zgw_storage::MetaStore;

/// Store wired to the real backing services
pub type Store = MetaStore<
    TracedKvConnector<RedisConnector>,
    TracedClusterAdapter<TcpClusterAdapter>,
    SystemClock,
>;

/// Open the store described by `config`
pub async fn open_store(config: &StoreConfig) -> Result<Store, CliError> {
    let connector = TracedKvConnector::new(RedisConnector::new());
    let cluster = TracedClusterAdapter::new(TcpClusterAdapter::with_timeout(config.connect_timeout));
    MetaStore::open(config, connector, cluster, SystemClock)
        .await
        .map_err(|e| CliError::from_store(e, config))
}

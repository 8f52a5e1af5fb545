// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-cluster client lifecycle
//!
//! Only the connection lifecycle of the bulk-data cluster matters to the metadata
//! store: it must be reachable when the store opens and released when it closes.

mod tcp;

pub use tcp::TcpClusterAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ClusterCall, FakeClusterAdapter};

use async_trait::async_trait;
use thiserror::Error;
use zgw_core::Endpoint;

/// Errors from the data-cluster client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("no meta nodes given")]
    NoNodes,
    #[error("no meta node reachable: {0}")]
    Unreachable(String),
}

/// Adapter for the data-cluster client
#[async_trait]
pub trait ClusterAdapter: Send + Sync + 'static {
    /// Connect to the cluster through its meta nodes
    async fn connect(&mut self, nodes: &[Endpoint]) -> Result<(), ClusterError>;

    /// Release the cluster session. Idempotent.
    async fn disconnect(&mut self);

    fn is_connected(&self) -> bool;
}

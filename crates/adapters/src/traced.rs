// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::cluster::{ClusterAdapter, ClusterError};
use crate::kv::{Command, KvConnection, KvConnector, KvError, Reply};
use async_trait::async_trait;
use std::time::Duration;
use tracing::Instrument;
use zgw_core::Endpoint;

/// Wrapper that adds tracing to any KvConnector
#[derive(Clone)]
pub struct TracedKvConnector<K> {
    inner: K,
}

impl<K> TracedKvConnector<K> {
    pub fn new(inner: K) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<K: KvConnector> KvConnector for TracedKvConnector<K> {
    type Connection = TracedKvConnection<K::Connection>;

    async fn connect(
        &self,
        endpoint: &Endpoint,
        timeout: Duration,
    ) -> Result<Self::Connection, KvError> {
        let span = tracing::info_span!("kv.connect", %endpoint);

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.connect(endpoint, timeout).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "connected"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "connect failed"),
            }

            result.map(|inner| TracedKvConnection { inner })
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any KvConnection
pub struct TracedKvConnection<C> {
    inner: C,
}

#[async_trait]
impl<C: KvConnection> KvConnection for TracedKvConnection<C> {
    async fn execute(&mut self, command: &Command) -> Result<Reply, KvError> {
        let span = tracing::debug_span!("kv.execute", cmd = command.name(), key = command.key());

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.execute(command).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(Reply::Error(msg)) => tracing::warn!(elapsed_ms, error = %msg, "error reply"),
                Ok(reply) => tracing::debug!(elapsed_ms, reply = reply.kind(), "done"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "transport failure"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ClusterAdapter
pub struct TracedClusterAdapter<A> {
    inner: A,
}

impl<A> TracedClusterAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: ClusterAdapter> ClusterAdapter for TracedClusterAdapter<A> {
    async fn connect(&mut self, nodes: &[Endpoint]) -> Result<(), ClusterError> {
        let span = tracing::info_span!("cluster.connect", nodes = nodes.len());

        async move {
            let result = self.inner.connect(nodes).await;
            match &result {
                Ok(()) => tracing::info!("connected"),
                Err(e) => tracing::error!(error = %e, "connect failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn disconnect(&mut self) {
        self.inner.disconnect().await;
        tracing::info!("cluster disconnected");
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TCP session to the data cluster's meta nodes

use super::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use zgw_core::Endpoint;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Holds a TCP session to the first reachable meta node
pub struct TcpClusterAdapter {
    timeout: Duration,
    session: Option<(Endpoint, TcpStream)>,
}

impl TcpClusterAdapter {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            session: None,
        }
    }

    /// Meta node currently holding the session
    pub fn meta_node(&self) -> Option<&Endpoint> {
        self.session.as_ref().map(|(ep, _)| ep)
    }
}

impl Default for TcpClusterAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterAdapter for TcpClusterAdapter {
    async fn connect(&mut self, nodes: &[Endpoint]) -> Result<(), ClusterError> {
        if nodes.is_empty() {
            return Err(ClusterError::NoNodes);
        }

        let mut failures = Vec::with_capacity(nodes.len());
        for node in nodes {
            let addr = (node.host.as_str(), node.port);
            match tokio::time::timeout(self.timeout, TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => {
                    self.session = Some((node.clone(), stream));
                    return Ok(());
                }
                Ok(Err(e)) => failures.push(format!("{node}: {e}")),
                Err(_) => failures.push(format!("{node}: timed out")),
            }
        }
        Err(ClusterError::Unreachable(failures.join("; ")))
    }

    async fn disconnect(&mut self) {
        self.session = None;
    }

    fn is_connected(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
#[path = "tcp_tests.rs"]
mod tests;

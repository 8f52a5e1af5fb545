// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake data-cluster adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use zgw_core::Endpoint;

/// Recorded cluster call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCall {
    Connect { nodes: Vec<Endpoint> },
    Disconnect,
}

#[derive(Default)]
struct State {
    calls: Vec<ClusterCall>,
    connected: bool,
    fail_connect: bool,
}

/// Fake cluster adapter; clones share state so tests can inspect after handing one off
#[derive(Clone, Default)]
pub struct FakeClusterAdapter {
    state: Arc<Mutex<State>>,
}

impl FakeClusterAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent connect fail
    pub fn set_fail_connect(&self, fail: bool) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fail_connect = fail;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ClusterCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl ClusterAdapter for FakeClusterAdapter {
    async fn connect(&mut self, nodes: &[Endpoint]) -> Result<(), ClusterError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(ClusterCall::Connect {
            nodes: nodes.to_vec(),
        });
        if state.fail_connect {
            return Err(ClusterError::Unreachable("fake cluster down".to_string()));
        }
        state.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(ClusterCall::Disconnect);
        state.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .connected
    }
}

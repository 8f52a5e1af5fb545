// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value connection with lazy reconnection
//!
//! A transport failure drops the handle and leaves the connection errored. The next
//! operation calls [`Connection::ensure_healthy`], which makes exactly one reconnect
//! attempt to the stored endpoint.

use std::time::Duration;
use tracing::{info, warn};
use zgw_adapters::{Command, KvConnection, KvConnector, KvError, Reply};
use zgw_core::Endpoint;

/// Health of the key-value connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Healthy,
    Errored,
}

/// Owned key-value connection plus what it takes to rebuild it
pub struct Connection<K: KvConnector> {
    connector: K,
    endpoint: Endpoint,
    timeout: Duration,
    /// `None` while errored
    handle: Option<K::Connection>,
}

impl<K: KvConnector> Connection<K> {
    /// Connect once; fails with the connector's error untouched
    pub async fn open(connector: K, endpoint: Endpoint, timeout: Duration) -> Result<Self, KvError> {
        let handle = connector.connect(&endpoint, timeout).await?;
        Ok(Self {
            connector,
            endpoint,
            timeout,
            handle: Some(handle),
        })
    }

    pub fn state(&self) -> ConnectionState {
        match self.handle {
            Some(_) => ConnectionState::Healthy,
            None => ConnectionState::Errored,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Reconnect if errored. Returns whether the connection is usable.
    pub async fn ensure_healthy(&mut self) -> bool {
        if self.handle.is_some() {
            return true;
        }

        match self.connector.connect(&self.endpoint, self.timeout).await {
            Ok(handle) => {
                info!(endpoint = %self.endpoint, "key-value store reconnected");
                self.handle = Some(handle);
                true
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "key-value store reconnect failed");
                false
            }
        }
    }

    /// Drop the handle after a transport failure
    pub fn invalidate(&mut self) {
        if self.handle.take().is_some() {
            warn!(endpoint = %self.endpoint, "key-value connection marked unhealthy");
        }
    }

    /// Send one command. A missing handle is a transport failure.
    pub async fn execute(&mut self, command: &Command) -> Result<Reply, KvError> {
        match self.handle.as_mut() {
            Some(handle) => handle.execute(command).await,
            None => Err(KvError::Transport("not connected".to_string())),
        }
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metadata store client
//!
//! [`MetaStore`] exclusively owns the data-cluster session, the key-value connection,
//! and the lock coordinator. Every operation takes `&mut self`; callers that share a
//! store across tasks wrap it in their own mutex.

use crate::connection::{Connection, ConnectionState};
use crate::directory::Directory;
use crate::lock::{LockCoordinator, ReleaseOutcome};
use tracing::{info, warn};
use zgw_adapters::{ClusterAdapter, KvConnector, KvError};
use zgw_core::{CancelToken, Clock, Endpoint, HolderId, StoreConfig, StoreError, User};

/// Client for the user directory and its lock
pub struct MetaStore<K: KvConnector, A: ClusterAdapter, C: Clock> {
    cluster: A,
    conn: Connection<K>,
    lock: LockCoordinator<C>,
}

impl<K: KvConnector, A: ClusterAdapter, C: Clock> MetaStore<K, A, C> {
    /// Validate `config`, then connect to the data cluster and the key-value store.
    ///
    /// Nothing is contacted unless every address parses. A key-value failure
    /// disconnects the cluster session before returning.
    pub async fn open(
        config: &StoreConfig,
        connector: K,
        mut cluster: A,
        clock: C,
    ) -> Result<Self, StoreError> {
        if config.cluster_addrs.is_empty() {
            return Err(StoreError::invalid_argument(
                "at least one cluster address is required",
            ));
        }
        let nodes = Endpoint::parse_all(&config.cluster_addrs)?;
        let kv_endpoint: Endpoint = config.kv_addr.parse()?;
        let lock_config = config.lock_config();
        lock_config.validate()?;

        cluster.connect(&nodes).await.map_err(|e| {
            StoreError::io(format!("Failed to connect to cluster: {e}"))
        })?;

        let conn = match Connection::open(connector, kv_endpoint, config.connect_timeout).await {
            Ok(conn) => conn,
            Err(e) => {
                cluster.disconnect().await;
                return Err(match e {
                    KvError::Allocate(_) => StoreError::corruption(e.to_string()),
                    _ => StoreError::io(format!("Failed to connect to key-value store: {e}")),
                });
            }
        };

        info!(
            kv = %conn.endpoint(),
            nodes = nodes.len(),
            holder = %lock_config.holder,
            "metadata store opened"
        );
        Ok(Self {
            cluster,
            conn,
            lock: LockCoordinator::new(lock_config, clock),
        })
    }

    /// Add a user under the directory lock
    pub async fn add_user(&mut self, user: &User, cancel: &CancelToken) -> Result<(), StoreError> {
        self.directory().add_user(user, cancel).await
    }

    /// Remove a user under the directory lock
    pub async fn remove_user(
        &mut self,
        display_name: &str,
        cancel: &CancelToken,
    ) -> Result<(), StoreError> {
        self.directory().remove_user(display_name, cancel).await
    }

    /// List every user, sorted by display name
    pub async fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
        self.directory().list_users().await
    }

    /// Acquire the directory lock, waiting while another client holds it
    pub async fn lock(&mut self, cancel: &CancelToken) -> Result<(), StoreError> {
        self.lock.acquire(&mut self.conn, cancel).await
    }

    /// Release the directory lock if this client still holds it
    pub async fn unlock(&mut self) -> Result<ReleaseOutcome, StoreError> {
        self.lock.release(&mut self.conn).await
    }

    /// Reconnect the key-value store if a previous call broke the connection
    pub async fn ensure_healthy(&mut self) -> bool {
        self.conn.ensure_healthy().await
    }

    pub fn is_healthy(&self) -> bool {
        self.conn.state() == ConnectionState::Healthy
    }

    /// Identity this client stores in the lock key
    pub fn holder(&self) -> &HolderId {
        self.lock.holder()
    }

    /// Release both backing-store handles
    pub async fn close(self) {
        let Self {
            mut cluster,
            conn,
            lock,
        } = self;
        drop(conn);
        if cluster.is_connected() {
            cluster.disconnect().await;
        } else {
            warn!("cluster session already closed");
        }
        info!(holder = %lock.holder(), "metadata store closed");
    }

    fn directory(&mut self) -> Directory<'_, K, C> {
        Directory::new(&mut self.conn, &self.lock)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

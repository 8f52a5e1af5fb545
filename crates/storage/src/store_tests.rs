// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use yare::parameterized;
use zgw_adapters::{ClusterCall, FakeClusterAdapter, FakeKvConnector, FakeKvStore};
use zgw_core::lock::DEFAULT_LOCK_KEY;
use zgw_core::FakeClock;

type TestStore = MetaStore<FakeKvConnector, FakeClusterAdapter, FakeClock>;

fn config() -> StoreConfig {
    StoreConfig::new(
        vec!["10.0.0.1:9221".to_string(), "10.0.0.2:9221".to_string()],
        "127.0.0.1:6379",
    )
    .with_identity("gw-1")
}

async fn open_with(
    config: &StoreConfig,
    kv: &FakeKvStore,
    cluster: &FakeClusterAdapter,
) -> Result<TestStore, StoreError> {
    MetaStore::open(config, kv.connector(), cluster.clone(), kv.clock().clone()).await
}

#[tokio::test]
async fn open_connects_cluster_then_kv() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();

    let store = open_with(&config(), &kv, &cluster).await.unwrap();

    assert!(store.is_healthy());
    assert_eq!(store.holder().as_str(), "gw-1");
    assert_eq!(
        cluster.calls(),
        vec![ClusterCall::Connect {
            nodes: vec![Endpoint::new("10.0.0.1", 9221), Endpoint::new("10.0.0.2", 9221)],
        }]
    );
    assert_eq!(kv.connect_count(), 1);
}

#[tokio::test]
async fn open_requires_a_cluster_address() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let config = StoreConfig::new(vec![], "127.0.0.1:6379");

    let err = open_with(&config, &kv, &cluster).await.err().unwrap();

    assert!(err.is_invalid_argument());
    assert!(cluster.calls().is_empty());
    assert_eq!(kv.connect_count(), 0);
}

#[parameterized(
    cluster_without_port = { vec!["meta-1"], "127.0.0.1:6379" },
    one_bad_cluster_addr = { vec!["meta-1:9221", "meta-2:http"], "127.0.0.1:6379" },
    kv_port_zero = { vec!["meta-1:9221"], "127.0.0.1:0" },
    kv_empty = { vec!["meta-1:9221"], "" },
)]
fn malformed_address_contacts_nothing(cluster_addrs: Vec<&str>, kv_addr: &str) {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let config = StoreConfig::new(
        cluster_addrs.into_iter().map(String::from).collect(),
        kv_addr,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let err = runtime
        .block_on(open_with(&config, &kv, &cluster))
        .err()
        .unwrap();

    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("invalid address"));
    assert!(cluster.calls().is_empty());
    assert_eq!(kv.connect_count(), 0);
}

#[tokio::test]
async fn open_rejects_lease_not_above_retry_interval() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let config = config().with_lease(Duration::from_millis(500));

    let err = open_with(&config, &kv, &cluster).await.err().unwrap();

    assert!(err.is_invalid_argument());
    assert!(cluster.calls().is_empty());
}

#[tokio::test]
async fn open_without_identity_picks_a_random_one() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let config = StoreConfig::new(vec!["meta:9221".to_string()], "kv:6379");

    let a = open_with(&config, &kv, &cluster).await.unwrap();
    let b = open_with(&config, &kv, &cluster).await.unwrap();

    assert!(!a.holder().as_str().is_empty());
    assert_ne!(a.holder(), b.holder());
}

#[tokio::test]
async fn cluster_failure_is_io_and_skips_kv() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    cluster.set_fail_connect(true);

    let err = open_with(&config(), &kv, &cluster).await.err().unwrap();

    assert!(err.is_io());
    assert!(err.to_string().contains("Failed to connect to cluster"));
    assert_eq!(kv.connect_count(), 0);
}

#[tokio::test]
async fn kv_connect_failure_is_io_and_releases_cluster() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    kv.fail_next_connect(KvError::Connect("connection refused".into()));

    let err = open_with(&config(), &kv, &cluster).await.err().unwrap();

    assert!(err.is_io());
    assert_eq!(cluster.calls().last(), Some(&ClusterCall::Disconnect));
    assert!(!cluster.is_connected());
}

#[tokio::test]
async fn kv_allocation_failure_is_corruption() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    kv.fail_next_connect(KvError::Allocate("out of memory".into()));

    let err = open_with(&config(), &kv, &cluster).await.err().unwrap();

    assert!(err.is_corruption());
    assert!(err.to_string().contains("can't allocate context"));
    assert_eq!(cluster.calls().last(), Some(&ClusterCall::Disconnect));
}

#[tokio::test]
async fn directory_operations_round_trip() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let mut store = open_with(&config(), &kv, &cluster).await.unwrap();
    let cancel = CancelToken::new();
    let alice = User::new("u-1", "alice").with_key_pair("tier", "gold");
    let bob = User::new("u-2", "bob");

    store.add_user(&bob, &cancel).await.unwrap();
    store.add_user(&alice, &cancel).await.unwrap();
    assert_eq!(store.list_users().await.unwrap(), vec![alice.clone(), bob]);

    store.remove_user("bob", &cancel).await.unwrap();
    assert_eq!(store.list_users().await.unwrap(), vec![alice]);
}

#[tokio::test]
async fn explicit_lock_blocks_another_client() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let mut first = open_with(&config(), &kv, &cluster).await.unwrap();
    let mut second = open_with(&config().with_identity("gw-2"), &kv, &cluster)
        .await
        .unwrap();

    first.lock(&CancelToken::new()).await.unwrap();
    assert_eq!(kv.get_string(DEFAULT_LOCK_KEY).as_deref(), Some("gw-1"));

    // Lease (10s) runs out while the second client polls
    second.lock(&CancelToken::new()).await.unwrap();
    assert_eq!(kv.get_string(DEFAULT_LOCK_KEY).as_deref(), Some("gw-2"));
    assert_eq!(kv.clock().total_slept(), Duration::from_secs(10));

    assert_eq!(first.unlock().await, Ok(ReleaseOutcome::NotHeld));
    assert_eq!(second.unlock().await, Ok(ReleaseOutcome::Released));
}

#[tokio::test]
async fn health_follows_transport_failures() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let mut store = open_with(&config(), &kv, &cluster).await.unwrap();
    kv.inject("SMEMBERS", Err(KvError::Transport("reset".into())));

    assert!(store.list_users().await.unwrap_err().is_io());
    assert!(!store.is_healthy());

    assert!(store.ensure_healthy().await);
    assert!(store.is_healthy());
    assert_eq!(kv.connect_count(), 2);
}

#[tokio::test]
async fn close_disconnects_cluster() {
    let kv = FakeKvStore::new();
    let cluster = FakeClusterAdapter::new();
    let store = open_with(&config(), &kv, &cluster).await.unwrap();

    store.close().await;

    assert!(!cluster.is_connected());
    assert_eq!(cluster.calls().last(), Some(&ClusterCall::Disconnect));
}

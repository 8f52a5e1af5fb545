// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the backing stores

pub mod cluster;
pub mod kv;
pub mod traced;

pub use cluster::{ClusterAdapter, ClusterError, TcpClusterAdapter};
pub use kv::{Command, KvConnection, KvConnector, KvError, RedisConnector, Reply};
pub use traced::{TracedClusterAdapter, TracedKvConnection, TracedKvConnector};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use cluster::{ClusterCall, FakeClusterAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use kv::{FakeKvConnection, FakeKvConnector, FakeKvStore, KvCall};

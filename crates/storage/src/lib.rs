// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zgw-storage: the user directory over a shared key-value store
//!
//! One client instance owns one key-value connection and one data-cluster session.
//! Directory mutations are serialized across processes by a single leased lock key.

pub mod classify;
pub mod connection;
pub mod directory;
pub mod keys;
pub mod lock;
pub mod store;

pub use classify::{LockHeld, Outcome};
pub use connection::{Connection, ConnectionState};
pub use directory::Directory;
pub use lock::{LockCoordinator, ReleaseOutcome};
pub use store::MetaStore;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zgw-core: Core library for the zgw metadata store client
//!
//! This crate provides:
//! - Directory entry types and their field/value record codec
//! - The error taxonomy shared by every backing-store operation
//! - Lock identity and lease configuration
//! - File configuration, endpoint parsing, clocks and cancellation

pub mod cancel;
pub mod clock;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod id;
pub mod lock;
pub mod user;

// Re-exports
pub use cancel::CancelToken;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, LockSettings, StoreConfig};
pub use endpoint::Endpoint;
pub use error::StoreError;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use lock::{HolderId, LockConfig};
pub use user::{User, UserRecordError, NAME_FIELD, UID_FIELD};

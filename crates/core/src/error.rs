// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for metadata store operations

use thiserror::Error;

/// Errors returned by every public metadata store operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Malformed configuration or caller input. Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Transport or connectivity failure. The connection is marked unhealthy and the
    /// next operation reconnects.
    #[error("io error: {0}")]
    Io(String),
    /// The backing store answered, but the answer violates the expected protocol or a
    /// directory invariant.
    #[error("corruption: {0}")]
    Corruption(String),
    /// A blocking wait was abandoned through its cancel token
    #[error("cancelled: {0}")]
    Cancelled(String),
}

impl StoreError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corruption(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

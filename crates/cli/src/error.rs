// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Store errors are turned into a message, the likely cause, and the next thing
//! an operator can try.

use std::fmt;
use zgw_core::{StoreConfig, StoreError};

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Explain a failed store operation against `config`
    pub fn from_store(err: StoreError, config: &StoreConfig) -> Self {
        let base = CliError::new(err.to_string());
        let explained = match &err {
            StoreError::InvalidArgument(_) => base
                .with_context("The configuration or arguments were rejected before connecting")
                .with_suggestion("Addresses must be host:port, e.g. --kv 127.0.0.1:6379")
                .with_suggestion("The lock lease must exceed the retry interval"),
            StoreError::Io(_) => base
                .with_context(format!(
                    "The key-value store at {} or the data cluster did not respond",
                    display_or_unset(&config.kv_addr)
                ))
                .with_suggestion("Check the services are running and reachable")
                .with_suggestion("Retry; the client reconnects on its next call"),
            StoreError::Corruption(msg) if msg.contains("User Already Exists") => base
                .with_context("Display names are unique across the directory")
                .with_suggestion("List existing users: zgw user list"),
            StoreError::Corruption(msg) if msg.contains("User Not Found") => base
                .with_suggestion("List existing users: zgw user list"),
            StoreError::Corruption(_) => base
                .with_context("The store answered with something the directory does not expect")
                .with_suggestion("Inspect the keys zgw_users and zgw_user:<name> in the store"),
            StoreError::Cancelled(_) => base
                .with_context("Interrupted while waiting for the directory lock")
                .with_suggestion(format!(
                    "A crashed holder's lock expires after its lease ({})",
                    humantime::format_duration(config.lock.lease)
                )),
        };
        explained.with_source(err)
    }
}

fn display_or_unset(addr: &str) -> &str {
    if addr.is_empty() {
        "<unset>"
    } else {
        addr
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

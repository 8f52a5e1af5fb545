// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a single value in the given format
pub fn render<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    })
}

/// Render a list; text output uses `empty` when there is nothing to show
pub fn render_list<T: Serialize + Display>(
    items: &[T],
    format: OutputFormat,
    empty: &str,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text if items.is_empty() => empty.to_string(),
        OutputFormat::Text => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(items)?,
    })
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow unwrap in test code
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! zgw - gateway metadata store administration

mod commands;
mod error;
mod output;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, user};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::error::CliError;

#[derive(Parser)]
#[command(
    name = "zgw",
    version,
    about = "Gateway metadata store - manage the object-user directory"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Data-cluster meta node, host:port (repeatable)
    #[arg(long = "cluster", global = true, value_name = "ADDR")]
    cluster: Vec<String>,

    /// Key-value store address, host:port
    #[arg(long, global = true, value_name = "ADDR")]
    kv: Option<String>,

    /// Lock holder identity (default: random per invocation)
    #[arg(long, global = true)]
    identity: Option<String>,

    /// Lock lease, e.g. "10s" or "1500ms"
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    lease: Option<Duration>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User directory management
    User(user::UserArgs),
    /// Show the resolved configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(err) => eprint!("{err}"),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = settings::Overrides {
        cluster: cli.cluster,
        kv: cli.kv,
        identity: cli.identity,
        lease: cli.lease,
    };
    let resolved = settings::resolve(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Config(args) => config::handle(&resolved, args),
        Commands::User(args) => user::handle(&resolved, args).await,
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

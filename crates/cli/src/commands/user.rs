// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User directory commands

use super::{open_store, Store};
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use zgw_core::{CancelToken, StoreConfig, StoreError, User};

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Add a user to the directory
    Add {
        /// Display name, unique across the directory
        name: String,
        /// Opaque user identifier
        #[arg(long)]
        uid: String,
        /// Extra attribute, key=value (repeatable)
        #[arg(long = "attr", value_parser = parse_key_value)]
        attrs: Vec<(String, String)>,
    },
    /// List every user, sorted by name
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Remove a user from the directory
    Remove {
        /// Display name
        name: String,
    },
}

pub(crate) fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no '=' found in '{}'", s))?;
    if key.is_empty() {
        return Err(format!("invalid key=value: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Cancel `token`; true when it was already cancelled by an earlier interrupt.
/// Only a lock wait observes the token, so a repeated interrupt must exit.
fn interrupt(token: &CancelToken) -> bool {
    let repeated = token.is_cancelled();
    token.cancel();
    repeated
}

/// What a successful command has to show
enum Report {
    Message(String),
    Users(Vec<User>, OutputFormat),
}

pub async fn handle(config: &StoreConfig, args: UserArgs) -> Result<()> {
    let cancel = CancelToken::new();
    let interrupted = cancel.clone();
    ctrlc::set_handler(move || {
        if interrupt(&interrupted) {
            eprintln!("\nInterrupted again, exiting");
            std::process::exit(130);
        }
        eprintln!("\nInterrupted, abandoning the lock wait (again to exit)...");
    })?;

    let mut store = open_store(config).await?;
    let result = run(&mut store, args.command, &cancel).await;
    store.close().await;

    match result.map_err(|e| CliError::from_store(e, config))? {
        Report::Message(message) => println!("{message}"),
        Report::Users(users, format) => {
            println!("{}", output::render_list(&users, format, "No users")?);
        }
    }
    Ok(())
}

async fn run(
    store: &mut Store,
    command: UserCommand,
    cancel: &CancelToken,
) -> Result<Report, StoreError> {
    match command {
        UserCommand::Add { name, uid, attrs } => {
            let mut user = User::new(uid, name);
            user.key_pairs.extend(attrs);
            store.add_user(&user, cancel).await?;
            Ok(Report::Message(format!("Added {user}")))
        }
        UserCommand::List { format } => Ok(Report::Users(store.list_users().await?, format)),
        UserCommand::Remove { name } => {
            store.remove_user(&name, cancel).await?;
            Ok(Report::Message(format!("Removed {name}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn second_interrupt_asks_to_exit() {
        let token = CancelToken::new();
        assert!(!interrupt(&token));
        assert!(token.is_cancelled());
        assert!(interrupt(&token));
    }

    #[test]
    fn key_value_requires_equals_and_key() {
        assert!(parse_key_value("tier").is_err());
        assert!(parse_key_value("=gold").is_err());
    }
}

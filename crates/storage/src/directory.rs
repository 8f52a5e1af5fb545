// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User directory operations
//!
//! Mutations run under the directory lock. The membership set and the per-user
//! records are written in separate round-trips, so a listing may observe a
//! half-applied add; records missing for a member are skipped.

use crate::classify::{run, Failure};
use crate::connection::Connection;
use crate::keys::{user_key, USER_SET};
use crate::lock::LockCoordinator;
use tracing::{debug, info};
use zgw_adapters::{Command, KvConnector, Reply};
use zgw_core::{CancelToken, Clock, StoreError, User};

/// Directory view over a borrowed connection and lock
pub struct Directory<'a, K: KvConnector, C: Clock> {
    conn: &'a mut Connection<K>,
    lock: &'a LockCoordinator<C>,
}

impl<'a, K: KvConnector, C: Clock> Directory<'a, K, C> {
    pub fn new(conn: &'a mut Connection<K>, lock: &'a LockCoordinator<C>) -> Self {
        Self { conn, lock }
    }

    /// Add a user. Fails with a corruption error if the name is taken.
    pub async fn add_user(&mut self, user: &User, cancel: &CancelToken) -> Result<(), StoreError> {
        user.validate()?;
        if !self.conn.ensure_healthy().await {
            return Err(StoreError::io("Reconnect"));
        }

        self.lock.acquire(self.conn, cancel).await?;
        match self.write_user(user).await {
            Ok(()) => {
                self.lock.release(self.conn).await?;
                info!(user = %user.display_name, uid = %user.user_id, "user added");
                Ok(())
            }
            Err(failure) => Err(self.lock.abort(self.conn, failure).await),
        }
    }

    /// Remove a user by display name. Fails with a corruption error if absent.
    pub async fn remove_user(
        &mut self,
        display_name: &str,
        cancel: &CancelToken,
    ) -> Result<(), StoreError> {
        if display_name.is_empty() {
            return Err(StoreError::invalid_argument(
                "display name must not be empty",
            ));
        }
        if !self.conn.ensure_healthy().await {
            return Err(StoreError::io("Reconnect"));
        }

        self.lock.acquire(self.conn, cancel).await?;
        match self.delete_user(display_name).await {
            Ok(()) => {
                self.lock.release(self.conn).await?;
                info!(user = %display_name, "user removed");
                Ok(())
            }
            Err(failure) => Err(self.lock.abort(self.conn, failure).await),
        }
    }

    /// Every user in the directory, sorted by display name. Takes no lock.
    pub async fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
        if !self.conn.ensure_healthy().await {
            return Err(StoreError::io("Reconnect"));
        }

        match self.read_users().await {
            Ok(users) => {
                debug!(count = users.len(), "users listed");
                Ok(users)
            }
            Err(failure) => Err(failure.escalate(self.conn)),
        }
    }

    async fn write_user(&mut self, user: &User) -> Result<(), Failure> {
        let name = user.display_name.as_str();
        match run(self.conn, "AddUser::SADD", &Command::set_add(USER_SET, name)).await? {
            Reply::Integer(1) => {}
            Reply::Integer(0) => return Err(Failure::logic("User Already Exists")),
            other => return Err(Failure::unexpected("AddUser::SADD", &other)),
        }

        // Clear any record left behind by an earlier, half-written add
        let key = user_key(name);
        let failure = match run(self.conn, "AddUser::DEL", &Command::delete(key.as_str())).await {
            Ok(Reply::Integer(_)) => None,
            Ok(other) => Some(Failure::unexpected("AddUser::DEL", &other)),
            Err(failure) => Some(failure),
        };
        if let Some(failure) = failure {
            return Err(self.undo_membership(name, failure).await);
        }

        let write = Command::hash_set_fields(key, user.to_fields());
        let failure = match run(self.conn, "AddUser::HSET", &write).await {
            Ok(Reply::Integer(_)) => return Ok(()),
            Ok(other) => Failure::unexpected("AddUser::HSET", &other),
            Err(failure) => failure,
        };
        Err(self.undo_membership(name, failure).await)
    }

    /// Drop `name` from the membership set after its record could not be written
    async fn undo_membership(&mut self, name: &str, failure: Failure) -> Failure {
        let Failure::Logic(msg) = failure else {
            return failure;
        };
        match run(self.conn, "AddUser::SREM", &Command::set_remove(USER_SET, name)).await {
            Ok(_) => Failure::Logic(format!("{msg}, membership rolled back")),
            Err(Failure::Logic(undo)) => Failure::Logic(format!("{msg}, {undo}")),
            Err(io) => io,
        }
    }

    async fn delete_user(&mut self, name: &str) -> Result<(), Failure> {
        match run(self.conn, "RemoveUser::SREM", &Command::set_remove(USER_SET, name)).await? {
            Reply::Integer(1) => {}
            Reply::Integer(0) => return Err(Failure::logic("User Not Found")),
            other => return Err(Failure::unexpected("RemoveUser::SREM", &other)),
        }
        match run(self.conn, "RemoveUser::DEL", &Command::delete(user_key(name))).await? {
            Reply::Integer(_) => Ok(()),
            other => Err(Failure::unexpected("RemoveUser::DEL", &other)),
        }
    }

    async fn read_users(&mut self) -> Result<Vec<User>, Failure> {
        let reply = run(self.conn, "ListUsers::SMEMBERS", &Command::set_members(USER_SET)).await?;
        let members = strings("ListUsers::SMEMBERS", reply)?;

        let mut users = Vec::with_capacity(members.len());
        for member in members {
            let reply =
                run(self.conn, "ListUsers::HGETALL", &Command::hash_get_all(user_key(&member)))
                    .await?;
            let tokens = strings("ListUsers::HGETALL", reply)?;
            if tokens.is_empty() {
                debug!(user = %member, "member has no record, skipping");
                continue;
            }

            let mut user = User::from_fields(tokens.as_slice())
                .map_err(|e| Failure::Logic(format!("ListUsers::HGETALL: {member}: {e}")))?;
            if user.display_name.is_empty() {
                user.display_name = member;
            }
            users.push(user);
        }

        users.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(users)
    }
}

/// Flatten an array reply of strings, rejecting any other shape
fn strings(op: &str, reply: Reply) -> Result<Vec<String>, Failure> {
    if !matches!(reply, Reply::Array(_)) {
        return Err(Failure::unexpected(op, &reply));
    }
    reply
        .into_strings()
        .ok_or_else(|| Failure::Logic(format!("{op}: non-string element in array reply")))
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;

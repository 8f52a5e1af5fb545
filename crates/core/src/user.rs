// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory entries and their field/value record layout
//!
//! A user is stored as a flat hash: the reserved fields [`UID_FIELD`] and
//! [`NAME_FIELD`] followed by one field per extra attribute. Attributes may not reuse
//! a reserved name, and on read the reserved fields always populate `user_id` and
//! `display_name`.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Record field holding [`User::user_id`]
pub const UID_FIELD: &str = "uid";
/// Record field holding [`User::display_name`]
pub const NAME_FIELD: &str = "name";

/// Errors decoding a stored user record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserRecordError {
    #[error("odd number of field/value tokens: {0}")]
    OddTokenCount(usize),
}

/// A directory entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier assigned outside the directory
    pub user_id: String,
    /// Unique name; the directory key for this user
    pub display_name: String,
    /// Extra attributes
    #[serde(default)]
    pub key_pairs: BTreeMap<String, String>,
}

impl User {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            key_pairs: BTreeMap::new(),
        }
    }

    pub fn with_key_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_pairs.insert(key.into(), value.into());
        self
    }

    /// Check the user can be written without losing information on read
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.display_name.is_empty() {
            return Err(StoreError::invalid_argument(
                "display name must not be empty",
            ));
        }
        if let Some(key) = self
            .key_pairs
            .keys()
            .find(|k| is_reserved_field(k.as_str()))
        {
            return Err(StoreError::invalid_argument(format!(
                "attribute {key:?} uses a reserved field name"
            )));
        }
        Ok(())
    }

    /// Field/value pairs in storage order: reserved fields first
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(self.key_pairs.len() + 2);
        fields.push((UID_FIELD.to_string(), self.user_id.clone()));
        fields.push((NAME_FIELD.to_string(), self.display_name.clone()));
        fields.extend(
            self.key_pairs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        fields
    }

    /// Rebuild a user from a flat `field, value, field, value, ...` token list
    pub fn from_fields<S: AsRef<str>>(tokens: &[S]) -> Result<User, UserRecordError> {
        if tokens.len() % 2 != 0 {
            return Err(UserRecordError::OddTokenCount(tokens.len()));
        }

        let mut user = User::default();
        for pair in tokens.chunks_exact(2) {
            let (field, value) = (pair[0].as_ref(), pair[1].as_ref());
            match field {
                UID_FIELD => user.user_id = value.to_string(),
                NAME_FIELD => user.display_name = value.to_string(),
                _ => {
                    user.key_pairs.insert(field.to_string(), value.to_string());
                }
            }
        }
        Ok(user)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.user_id)?;
        for (k, v) in &self.key_pairs {
            write!(f, " {k}={v}")?;
        }
        Ok(())
    }
}

/// Whether `field` is one of the reserved record fields
pub fn is_reserved_field(field: &str) -> bool {
    field == UID_FIELD || field == NAME_FIELD
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;

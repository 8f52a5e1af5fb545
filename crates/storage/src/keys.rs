// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key layout of the user directory

/// Set holding every display name in the directory
pub const USER_SET: &str = "zgw_users";

/// Prefix of per-user hash records
pub const USER_PREFIX: &str = "zgw_user:";

/// Hash key of the record for `display_name`
pub fn user_key(display_name: &str) -> String {
    format!("{USER_PREFIX}{display_name}")
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

fn alice() -> User {
    User::new("u-1", "alice")
        .with_key_pair("email", "alice@example.com")
        .with_key_pair("tier", "gold")
}

#[test]
fn fields_put_reserved_names_first() {
    let fields = alice().to_fields();
    assert_eq!(fields[0], ("uid".to_string(), "u-1".to_string()));
    assert_eq!(fields[1], ("name".to_string(), "alice".to_string()));
    assert_eq!(fields.len(), 4);
}

#[test]
fn from_fields_recognizes_reserved_names_in_any_position() {
    let tokens = ["tier", "gold", "name", "alice", "uid", "u-1", "email", "a@x"];
    let user = User::from_fields(&tokens).unwrap();
    assert_eq!(user.user_id, "u-1");
    assert_eq!(user.display_name, "alice");
    assert_eq!(user.key_pairs.len(), 2);
    assert_eq!(user.key_pairs["tier"], "gold");
}

#[test]
fn from_fields_rejects_odd_token_count() {
    let err = User::from_fields(&["uid", "u-1", "name"]).unwrap_err();
    assert_eq!(err, UserRecordError::OddTokenCount(3));
}

#[test]
fn from_fields_accepts_empty_record() {
    let empty: [&str; 0] = [];
    assert_eq!(User::from_fields(&empty).unwrap(), User::default());
}

#[test]
fn validate_accepts_plain_user() {
    assert!(alice().validate().is_ok());
}

#[test]
fn validate_rejects_empty_display_name() {
    let err = User::new("u-1", "").validate().unwrap_err();
    assert!(err.is_invalid_argument());
}

#[parameterized(
    uid = { "uid" },
    name = { "name" },
)]
fn validate_rejects_reserved_attribute(key: &str) {
    let err = alice().with_key_pair(key, "shadow").validate().unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn reserved_fields_win_when_record_has_both() {
    // A record written by an older client that stored a second "name" token after
    // the reserved one: the last reserved token wins, nothing leaks into key_pairs.
    let tokens = ["uid", "u-1", "name", "alice", "name", "mallory"];
    let user = User::from_fields(&tokens).unwrap();
    assert_eq!(user.display_name, "mallory");
    assert!(user.key_pairs.is_empty());
}

#[test]
fn display_lists_attributes() {
    assert_eq!(
        alice().to_string(),
        "alice (u-1) email=alice@example.com tier=gold"
    );
}

proptest! {
    #[test]
    fn valid_users_survive_field_layout(
        uid in "[a-z0-9-]{0,12}",
        name in "[a-z]{1,12}",
        attrs in proptest::collection::btree_map("[a-z]{3,8}", ".{0,16}", 0..6)
    ) {
        let mut user = User::new(uid, name);
        for (k, v) in attrs {
            if !is_reserved_field(&k) {
                user.key_pairs.insert(k, v);
            }
        }
        prop_assume!(user.validate().is_ok());

        let tokens: Vec<String> = user
            .to_fields()
            .into_iter()
            .flat_map(|(f, v)| [f, v])
            .collect();
        prop_assert_eq!(User::from_fields(&tokens).unwrap(), user);
    }
}

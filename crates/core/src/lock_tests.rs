// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn test_config() -> LockConfig {
    LockConfig::new(HolderId::new("holder-1"))
        .with_lease(Duration::from_secs(5))
        .with_retry_interval(Duration::from_millis(500))
}

#[test]
fn defaults_use_well_known_key() {
    let config = LockConfig::new(HolderId::new("holder-1"));
    assert_eq!(config.key, DEFAULT_LOCK_KEY);
    assert_eq!(config.lease, DEFAULT_LEASE);
    assert_eq!(config.retry_interval, DEFAULT_RETRY_INTERVAL);
    assert!(config.validate().is_ok());
}

#[test]
fn lease_millis_truncates_sub_millisecond() {
    let config = test_config().with_lease(Duration::from_micros(2_500_900));
    assert_eq!(config.lease_millis(), 2500);
}

#[test]
fn lease_must_exceed_retry_interval() {
    let config = test_config().with_lease(Duration::from_millis(500));
    let err = config.validate().unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("retry interval"));
}

#[test]
fn empty_identity_is_rejected() {
    let config = LockConfig::new(HolderId::new(""));
    assert!(config.validate().unwrap_err().is_invalid_argument());
}

#[test]
fn empty_key_is_rejected() {
    let config = test_config().with_key("");
    assert!(config.validate().unwrap_err().is_invalid_argument());
}

#[test]
fn sub_millisecond_lease_is_rejected() {
    let config = test_config()
        .with_lease(Duration::from_micros(900))
        .with_retry_interval(Duration::from_micros(100));
    assert!(config.validate().unwrap_err().is_invalid_argument());
}

#[test]
fn holder_display_is_raw_identity() {
    assert_eq!(HolderId::new("gw-7").to_string(), "gw-7");
}

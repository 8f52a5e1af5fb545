//! User command validation specs
//!
//! Every case here fails before any network round-trip.

use crate::prelude::*;

#[test]
fn list_without_cluster_address_is_invalid_argument() {
    Project::empty()
        .zgw()
        .args(&["--kv", "127.0.0.1:6379", "user", "list"])
        .fails()
        .stderr_has("invalid argument")
        .stderr_has("cluster address");
}

#[test]
fn malformed_kv_address_is_invalid_argument() {
    Project::empty()
        .zgw()
        .args(&["--cluster", "meta-1:9221", "--kv", "kv-without-port", "user", "list"])
        .fails()
        .stderr_has("invalid argument: invalid address")
        .stderr_has("host:port");
}

#[test]
fn lease_not_above_retry_interval_is_invalid_argument() {
    Project::empty()
        .zgw()
        .args(&[
            "--cluster",
            "meta-1:9221",
            "--kv",
            "127.0.0.1:6379",
            "--lease",
            "100ms",
            "user",
            "list",
        ])
        .fails()
        .stderr_has("must exceed the retry interval");
}

#[test]
fn unreachable_cluster_is_io_error() {
    Project::empty()
        .zgw()
        .args(&["--cluster", CLOSED_ADDR, "--kv", CLOSED_ADDR, "user", "list"])
        .fails()
        .stderr_has("io error: Failed to connect to cluster");
}

#[test]
fn attribute_without_equals_is_rejected() {
    Project::empty()
        .zgw()
        .args(&["user", "add", "alice", "--uid", "u-1", "--attr", "tier"])
        .fails()
        .stderr_has("invalid key=value");
}

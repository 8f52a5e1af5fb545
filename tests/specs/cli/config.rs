//! Config command specs
//!
//! Verify file loading and flag precedence without contacting any store.

use crate::prelude::*;

#[test]
fn config_shows_file_values() {
    let temp = Project::empty();
    temp.file("zgw.toml", MINIMAL_CONFIG);

    temp.zgw()
        .args(&["--config", "zgw.toml", "config"])
        .passes()
        .stdout_has("meta-1:9221, meta-2:9221")
        .stdout_has("kv-1:6379")
        .stdout_has("gw-node-1")
        .stdout_has("30s")
        .stdout_has("zgw_lock");
}

#[test]
fn flags_override_file() {
    let temp = Project::empty();
    temp.file("zgw.toml", MINIMAL_CONFIG);

    temp.zgw()
        .args(&[
            "--config",
            "zgw.toml",
            "--kv",
            "kv-2:6380",
            "--identity",
            "gw-node-2",
            "--lease",
            "5s",
            "config",
        ])
        .passes()
        .stdout_has("kv-2:6380")
        .stdout_has("gw-node-2")
        .stdout_has("lease:           5s");
}

#[test]
fn config_json_is_machine_readable() {
    let temp = Project::empty();
    temp.file("zgw.toml", MINIMAL_CONFIG);

    let outcome = temp
        .zgw()
        .args(&["--config", "zgw.toml", "config", "--format", "json"])
        .passes();

    assert!(outcome.stdout().contains("\"kv_addr\": \"kv-1:6379\""));
    assert!(outcome.stdout().contains("\"retry_interval\": \"500ms\""));
}

#[test]
fn defaults_without_file() {
    Project::empty()
        .zgw()
        .args(&["config"])
        .passes()
        .stdout_has("<random>")
        .stdout_has("1s 500ms");
}

//! Error reporting specs

use crate::prelude::*;

#[test]
fn missing_config_file_fails_with_suggestions() {
    Project::empty()
        .zgw()
        .args(&["--config", "absent.toml", "config"])
        .fails()
        .stderr_has("cannot load configuration from absent.toml")
        .stderr_has("suggestions:");
}

#[test]
fn unknown_config_key_fails() {
    let temp = Project::empty();
    temp.file("zgw.toml", "kv_addr = \"kv:6379\"\nreplicas = 3\n");

    temp.zgw()
        .args(&["--config", "zgw.toml", "config"])
        .fails()
        .stderr_has("failed to parse config");
}

#[test]
fn malformed_lease_is_rejected_by_argument_parser() {
    Project::empty()
        .zgw()
        .args(&["--lease", "soon", "config"])
        .fails()
        .stderr_has("--lease");
}

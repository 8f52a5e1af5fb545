//! Help output specs

use crate::prelude::*;

#[test]
fn top_level_help_lists_commands() {
    Project::empty()
        .zgw()
        .args(&["--help"])
        .passes()
        .stdout_has("user")
        .stdout_has("config")
        .stdout_has("--cluster");
}

#[test]
fn user_help_lists_operations() {
    Project::empty()
        .zgw()
        .args(&["user", "--help"])
        .passes()
        .stdout_has("add")
        .stdout_has("list")
        .stdout_has("remove");
}

#[test]
fn missing_subcommand_fails() {
    Project::empty().zgw().fails();
}

#[test]
fn version_names_the_binary() {
    zgw()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::starts_with("zgw "));
}

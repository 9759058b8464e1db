//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn rqe_help_shows_usage() {
    rqe().args(["--help"]).assert().success().stdout_has("Usage:");
}

#[test]
fn rqe_cluster_help_shows_subcommands() {
    rqe()
        .args(["cluster", "--help"])
        .assert()
        .success()
        .stdout_has("status");
}

#[test]
fn rqe_rq_help_shows_subcommands() {
    rqe()
        .args(["rq", "--help"])
        .assert()
        .success()
        .stdout_has("add")
        .stdout_has("delete");
}

#[test]
fn rqe_entry_help_shows_subcommands() {
    rqe().args(["entry", "--help"]).assert().success().stdout_has("match");
}

#[test]
fn rqe_entry_match_help_shows_timeout_flag() {
    rqe()
        .args(["entry", "match", "--help"])
        .assert()
        .success()
        .stdout_has("--entry-timeout");
}

#[test]
fn rqe_version_shows_version() {
    rqe().args(["--version"]).assert().success().stdout_has("0.1");
}

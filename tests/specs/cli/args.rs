//! Argument validation specs: malformed input fails fast, with the
//! documented exit code, before any connection is attempted.

use crate::prelude::*;

#[test]
fn malformed_entry_part_exits_13() {
    rqe()
        .args(["entry", "match", "age25"])
        .assert()
        .failure()
        .code(13)
        .stderr_has("not in correct format");
}

#[test]
fn entry_part_with_two_separators_exits_13() {
    rqe()
        .args(["entry", "match", "age=25=30"])
        .assert()
        .failure()
        .code(13)
        .stderr_has("age=25=30");
}

#[test]
fn missing_entry_argument_exits_12() {
    rqe()
        .args(["entry", "match"])
        .assert()
        .failure()
        .code(12)
        .stderr_has("Missing entry argument");
}

#[test]
fn missing_delete_uuid_exits_12() {
    rqe()
        .args(["rq", "delete"])
        .assert()
        .failure()
        .code(12)
        .stderr_has("Missing uuid argument");
}

#[test]
fn malformed_rule_part_exits_13() {
    rqe()
        .args(["rq", "add", "age10"])
        .assert()
        .failure()
        .code(13)
        .stderr_has("not in correct format");
}

#[test]
fn unknown_rule_operator_exits_13() {
    rqe()
        .args(["rq", "add", "age:BETWEEN=10"])
        .assert()
        .failure()
        .code(13)
        .stderr_has("BETWEEN");
}

#[test]
fn missing_ca_cert_exits_10() {
    // Argument parsing succeeds; the exchange fails on missing trust
    // configuration before any connection is opened
    rqe()
        .args(["cluster", "status"])
        .assert()
        .failure()
        .code(10)
        .stderr_has("CA certificate required");
}

//! CLI-level tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("seiq")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn split_rejects_missing_input() {
    Command::cargo_bin("seiq")
        .unwrap()
        .args(["split", "no-such-file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn inspect_rejects_missing_input() {
    Command::cargo_bin("seiq")
        .unwrap()
        .args(["inspect", "no-such-file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

//! Tests for shell completion generation

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_completion_bash() {
    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("completion").arg("bash").assert().success().stdout(
        predicate::str::contains("_chartpack-cli()").and(predicate::str::contains("complete -F")),
    );
}

#[test]
fn test_completion_zsh() {
    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("completion")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef chartpack-cli"));
}

#[test]
fn test_completion_fish() {
    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("completion")
        .arg("fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c chartpack-cli"));
}

#[test]
fn test_completion_powershell() {
    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("completion")
        .arg("powershell")
        .assert()
        .success()
        .stdout(predicate::str::contains("chartpack-cli"));
}

#[test]
fn test_completion_invalid_shell() {
    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("completion").arg("ksh").assert().failure();
}

#[test]
fn test_completion_includes_subcommands() {
    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("completion").arg("bash").assert().success().stdout(
        predicate::str::contains("check")
            .and(predicate::str::contains("verify"))
            .and(predicate::str::contains("extract")),
    );
}

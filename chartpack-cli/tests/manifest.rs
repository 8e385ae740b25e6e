//! Integration tests for the manifest command

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

const MANIFEST_WITH_DEPS: &str = "\
apiVersion: v2
name: with-crds
version: 0.1.0
description: A chart that ships CRDs
dependencies:
  - name: common
    repository: https://charts.example.com
    version: 1.0.0
";

#[test]
fn test_manifest_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_chart_fixture(
        &dir,
        "with-crds-0.1.0.tgz",
        &[("with-crds/Chart.yaml", MANIFEST_WITH_DEPS)],
    );

    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("manifest")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Chart Manifest:")
                .and(predicate::str::contains("with-crds"))
                .and(predicate::str::contains("0.1.0"))
                .and(predicate::str::contains("common")),
        );
}

#[test]
fn test_manifest_json_round_trips_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_chart_fixture(
        &dir,
        "with-crds-0.1.0.tgz",
        &[("with-crds/Chart.yaml", MANIFEST_WITH_DEPS)],
    );

    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    let assert = cmd
        .arg("-o")
        .arg("json")
        .arg("manifest")
        .arg(&path)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["name"], "with-crds");
    assert_eq!(value["dependencies"][0]["name"], "common");
    assert_eq!(value["dependencies"][0]["version"], "1.0.0");
}

#[test]
fn test_manifest_missing_from_archive_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_chart_fixture(
        &dir,
        "no-manifest-0.1.0.tgz",
        &[("bare/values.yaml", "replicaCount: 1\n")],
    );

    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("manifest")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read chart manifest"));
}

#[test]
fn test_manifest_without_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_chart_fixture(
        &dir,
        "plain-0.1.0.tgz",
        &[(
            "plain/Chart.yaml",
            "apiVersion: v2\nname: plain\nversion: 2.3.4\n",
        )],
    );

    let mut cmd = Command::cargo_bin("chartpack-cli").unwrap();
    cmd.arg("manifest")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies declared"));
}

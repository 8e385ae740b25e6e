//! Shared fixture builders for CLI integration tests

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::PathBuf;

/// Entry path the packaged with-crds chart is expected to contain
pub const CRD_ENTRY: &str = "with-crds/crds/test.crd.yaml";

/// Build a gzipped tar archive from (path, content) pairs, in order
pub fn chart_tgz(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .unwrap();
    }

    let encoder = builder.into_inner().unwrap();
    encoder.finish().unwrap()
}

/// Entries of a complete with-crds chart
pub fn with_crds_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "with-crds/Chart.yaml",
            "apiVersion: v2\nname: with-crds\nversion: 0.1.0\n",
        ),
        ("with-crds/values.yaml", "replicaCount: 1\n"),
        (
            CRD_ENTRY,
            "apiVersion: apiextensions.k8s.io/v1\nkind: CustomResourceDefinition\n",
        ),
        (
            "with-crds/templates/deployment.yaml",
            "apiVersion: apps/v1\nkind: Deployment\n",
        ),
    ]
}

/// Entries of the same chart without its CRD document
pub fn without_crds_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "with-crds/Chart.yaml",
            "apiVersion: v2\nname: with-crds\nversion: 0.1.0\n",
        ),
        ("with-crds/values.yaml", "replicaCount: 1\n"),
        (
            "with-crds/templates/deployment.yaml",
            "apiVersion: apps/v1\nkind: Deployment\n",
        ),
    ]
}

/// Write a fixture archive into a temporary directory and return its path
pub fn write_chart_fixture(
    dir: &tempfile::TempDir,
    name: &str,
    entries: &[(&str, &str)],
) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, chart_tgz(entries)).unwrap();
    path
}

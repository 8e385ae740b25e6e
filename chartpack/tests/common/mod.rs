//! Shared fixture builders for chart archive tests
//!
//! Archives are built in memory with `tar::Builder` and `flate2`; no binary
//! fixtures are checked in.

#![allow(dead_code)]

use chartpack::ChartArchive;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Cursor;
use std::path::PathBuf;

/// Entry path the packaged with-crds chart is expected to contain
pub const CRD_ENTRY: &str = "with-crds/crds/test.crd.yaml";

/// Route library log output through the test harness (`RUST_LOG` selects
/// the level)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Manifest for the with-crds fixture chart
pub const WITH_CRDS_MANIFEST: &str = "\
apiVersion: v2
name: with-crds
version: 0.1.0
description: A chart that ships custom resource definitions
dependencies:
  - name: common
    repository: https://charts.example.com/common
    version: 1.0.0
";

/// Minimal CRD document for fixtures
pub const TEST_CRD: &str = "\
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: tests.example.com
";

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

/// Build a gzipped tar archive with explicit directory entries
pub fn chart_tgz_with_dirs(dirs: &[&str], files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for dir in dirs {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, *dir, std::io::empty())
            .unwrap();
    }

    for (path, content) in files {
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
        ("with-crds/Chart.yaml", WITH_CRDS_MANIFEST),
        ("with-crds/values.yaml", "replicaCount: 1\n"),
        (CRD_ENTRY, TEST_CRD),
        (
            "with-crds/templates/deployment.yaml",
            "apiVersion: apps/v1\nkind: Deployment\n",
        ),
    ]
}

/// Entries of the same chart without its CRD document
pub fn without_crds_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("with-crds/Chart.yaml", WITH_CRDS_MANIFEST),
        ("with-crds/values.yaml", "replicaCount: 1\n"),
        (
            "with-crds/templates/deployment.yaml",
            "apiVersion: apps/v1\nkind: Deployment\n",
        ),
    ]
}

/// Open an in-memory archive built from the given entries
pub fn archive_from(entries: &[(&str, &str)]) -> ChartArchive {
    ChartArchive::from_reader(Box::new(Cursor::new(chart_tgz(entries))), None).unwrap()
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

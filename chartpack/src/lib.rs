//! # Chartpack - Packaged Helm Chart Archive Library
//!
//! A small, safe Rust library for inspecting and verifying packaged Helm
//! chart archives (gzip-compressed tar files, usually named `*.tgz`).
//!
//! ## Features
//!
//! - Streaming iteration over archive entries (gzip + tar, via `flate2`/`tar`)
//! - Exact full-path containment checks (`with-crds/crds/test.crd.yaml`)
//! - `Chart.yaml` manifest parsing, including the dependency list
//! - A verification pass that reports expectation failures separately from
//!   operational errors
//! - Environment-based archive path resolution for test harnesses
//!
//! ## Example
//!
//! ```no_run
//! use chartpack::ChartArchive;
//!
//! # fn main() -> Result<(), chartpack::Error> {
//! // Open a packaged chart
//! let mut archive = ChartArchive::open("with-crds-0.1.0.tgz")?;
//!
//! // List entries in the archive
//! for entry in archive.entries()? {
//!     println!("{}", entry.path);
//! }
//!
//! // Check for a specific entry by its full path
//! if archive.contains("with-crds/crds/test.crd.yaml")? {
//!     println!("CRD is shipped with the chart");
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod archive;
pub mod error;
pub mod manifest;
pub mod resolve;
pub mod verify;

// Re-export commonly used types
pub use archive::{ChartArchive, ChartEntry};
pub use error::{Error, Result};
pub use manifest::{ChartDependency, ChartManifest};
pub use verify::{verify_archive, VerifyOptions, VerifyReport};

/// Magic byte constants for the container formats
pub mod magic {
    /// Gzip member header magic bytes (RFC 1952)
    pub const GZIP: [u8; 2] = [0x1F, 0x8B];

    /// Size of a tar header block in bytes
    pub const TAR_BLOCK_SIZE: usize = 512;
}

/// Well-known file and directory names inside a packaged chart
pub mod names {
    /// The chart manifest, directly under the chart root
    pub const CHART_MANIFEST: &str = "Chart.yaml";

    /// Default values file, directly under the chart root
    pub const VALUES_FILE: &str = "values.yaml";

    /// Directory holding custom resource definitions
    pub const CRDS_DIR: &str = "crds";

    /// Directory holding chart templates
    pub const TEMPLATES_DIR: &str = "templates";
}

/// First path component of an archive entry, if any
///
/// Packaged charts place every entry under a single top-level directory
/// named after the chart.
#[inline]
pub fn chart_root(entry_path: &str) -> Option<&str> {
    match entry_path.split('/').next() {
        Some("") | None => None,
        Some(root) => Some(root),
    }
}

/// Check whether an entry path is the chart manifest (`<root>/Chart.yaml`)
#[inline]
pub fn is_manifest_path(entry_path: &str) -> bool {
    let mut parts = entry_path.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(root), Some(file), None) if !root.is_empty() && file == names::CHART_MANIFEST
    )
}

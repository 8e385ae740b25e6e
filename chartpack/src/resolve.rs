//! Archive path resolution from the process environment
//!
//! The library core never reads the environment; callers that want the
//! conventional lookup do it here, at the edge, and pass the resolved path
//! to [`crate::ChartArchive::open`].

use crate::{Error, Result};
use std::path::PathBuf;

/// Conventional environment variable naming the chart archive under test
pub const DEFAULT_ARCHIVE_ENV: &str = "CHART_ARCHIVE";

/// Resolve the archive path from an environment variable
///
/// Fails with [`Error::Resolution`] if the variable is unset or blank. The
/// path is not checked for existence here; a missing file surfaces as
/// [`Error::Io`] from [`crate::ChartArchive::open`], so resolution failures
/// always precede file access failures.
pub fn archive_path_from_env(var: &str) -> Result<PathBuf> {
    let value = std::env::var_os(var)
        .ok_or_else(|| Error::resolution(format!("environment variable {var} is not set")))?;

    if value.to_string_lossy().trim().is_empty() {
        return Err(Error::resolution(format!(
            "environment variable {var} is set but blank"
        )));
    }

    Ok(PathBuf::from(value))
}

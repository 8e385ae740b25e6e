//! Error types for chart archive handling

use std::io;
use thiserror::Error;

/// Errors that can occur while resolving, reading, or checking a chart archive
#[derive(Error, Debug)]
pub enum Error {
    /// I/O failure while opening or reading the archive
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Logical path resolution failed (e.g. environment variable unset)
    #[error("Path resolution failed: {0}")]
    Resolution(String),

    /// Malformed gzip framing or tar structure
    #[error("Invalid archive format: {0}")]
    InvalidFormat(String),

    /// Chart manifest could not be deserialized
    #[error("Invalid chart manifest: {0}")]
    Manifest(String),

    /// No entry with the exact given path exists in the archive
    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),
}

impl Error {
    /// Create a resolution error
    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Error::Resolution(message.into())
    }

    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Error::InvalidFormat(message.into())
    }

    /// Create a manifest error
    pub fn manifest<S: Into<String>>(message: S) -> Self {
        Error::Manifest(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::resolution("environment variable CHART_ARCHIVE is not set");
        assert_eq!(
            err.to_string(),
            "Path resolution failed: environment variable CHART_ARCHIVE is not set"
        );

        let err = Error::invalid_format("not a gzip stream");
        assert_eq!(err.to_string(), "Invalid archive format: not a gzip stream");

        let err = Error::EntryNotFound("with-crds/crds/test.crd.yaml".to_string());
        assert_eq!(
            err.to_string(),
            "Entry not found in archive: with-crds/crds/test.crd.yaml"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("no such file"));
    }
}

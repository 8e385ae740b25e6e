//! Chart archive handling
//!
//! Provides streaming read access to packaged Helm charts: gzip-compressed
//! tar archives, conventionally named `<chart>-<version>.tgz`. Every
//! operation rewinds the underlying reader and performs one linear scan of
//! the tar stream; end-of-stream is the normal terminal condition.

use crate::manifest::{self, ChartManifest};
use crate::{magic, Error, Result};
use flate2::read::GzDecoder;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

// Preallocation cap for entry reads; header sizes are untrusted
const MAX_PREALLOC: u64 = 64 * 1024;

/// Reader trait for abstracting over different input sources
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// A packaged Helm chart archive
///
/// The archive is constructed from an explicit path or reader; it never
/// consults the process environment itself (see [`crate::resolve`] for the
/// environment-variable edge).
pub struct ChartArchive {
    /// Path to the archive, if opened from a file
    path: Option<PathBuf>,

    /// Reader for accessing the compressed archive data
    reader: Box<dyn ReadSeek>,
}

impl fmt::Debug for ChartArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartArchive")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Information about one entry observed during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    /// Full path exactly as stored in the tar header
    pub path: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl ChartArchive {
    /// Open a packaged chart archive from a file path
    ///
    /// Fails with [`Error::Io`] if the file is missing or unreadable and
    /// with [`Error::InvalidFormat`] if it does not start with a gzip
    /// header, before any entry is examined.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let reader = Box::new(BufReader::new(file));
        Self::from_reader(reader, Some(path))
    }

    /// Create a chart archive from any seekable reader
    pub fn from_reader<R>(reader: Box<R>, path: Option<PathBuf>) -> Result<Self>
    where
        R: ReadSeek + 'static,
    {
        let mut archive = ChartArchive { path, reader };
        archive.check_gzip_magic()?;
        Ok(archive)
    }

    /// Get the path to the archive, if opened from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Collect every entry in the archive, in archive order
    ///
    /// Each entry is observed exactly once; the scan terminates at
    /// end-of-stream. Malformed gzip or tar framing fails with
    /// [`Error::InvalidFormat`].
    pub fn entries(&mut self) -> Result<Vec<ChartEntry>> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut tar = tar::Archive::new(GzDecoder::new(&mut self.reader));

        let mut entries = Vec::new();
        for entry in tar.entries().map_err(classify_stream_error)? {
            let entry = entry.map_err(classify_stream_error)?;
            entries.push(ChartEntry {
                path: entry_name(&entry),
                size: entry.size(),
                is_dir: entry.header().entry_type().is_dir(),
            });
        }

        log::debug!("scanned {} entries from chart archive", entries.len());
        Ok(entries)
    }

    /// Collect every entry name in the archive, in archive order
    pub fn entry_names(&mut self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|e| e.path).collect())
    }

    /// Number of entries in the archive
    pub fn entry_count(&mut self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    /// Check whether an entry with the exact full path exists
    ///
    /// The comparison is case-sensitive and includes the directory prefix.
    /// The scan always runs to end-of-stream, so framing problems behind a
    /// matching entry still surface as errors.
    pub fn contains(&mut self, name: &str) -> Result<bool> {
        let mut found = false;
        for entry_path in self.entry_names()? {
            if entry_path == name {
                found = true;
            }
        }
        Ok(found)
    }

    /// Read the contents of the first entry with the exact given path
    ///
    /// Fails with [`Error::EntryNotFound`] after a complete scan without a
    /// match.
    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut tar = tar::Archive::new(GzDecoder::new(&mut self.reader));

        for entry in tar.entries().map_err(classify_stream_error)? {
            let mut entry = entry.map_err(classify_stream_error)?;
            if entry_name(&entry) == name {
                let mut data = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
                entry.read_to_end(&mut data).map_err(classify_stream_error)?;
                return Ok(data);
            }
        }

        Err(Error::EntryNotFound(name.to_string()))
    }

    /// Parse the chart manifest (`<root>/Chart.yaml`)
    ///
    /// Fails with [`Error::EntryNotFound`] if no manifest entry exists and
    /// with [`Error::Manifest`] if it cannot be deserialized.
    pub fn manifest(&mut self) -> Result<ChartManifest> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut tar = tar::Archive::new(GzDecoder::new(&mut self.reader));

        for entry in tar.entries().map_err(classify_stream_error)? {
            let mut entry = entry.map_err(classify_stream_error)?;
            if crate::is_manifest_path(&entry_name(&entry)) {
                let mut data = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
                entry.read_to_end(&mut data).map_err(classify_stream_error)?;
                return manifest::parse_manifest_bytes(&data);
            }
        }

        Err(Error::EntryNotFound(format!(
            "<root>/{}",
            crate::names::CHART_MANIFEST
        )))
    }

    /// Unique top-level directory names, in first-seen order
    ///
    /// A well-formed packaged chart has exactly one root, named after the
    /// chart.
    pub fn roots(&mut self) -> Result<Vec<String>> {
        let mut roots: Vec<String> = Vec::new();
        for entry_path in self.entry_names()? {
            if let Some(root) = crate::chart_root(&entry_path) {
                if !roots.iter().any(|r| r == root) {
                    roots.push(root.to_string());
                }
            }
        }
        Ok(roots)
    }

    /// Extract every entry into the given directory
    ///
    /// Entries whose path would escape the destination fail with
    /// [`Error::InvalidFormat`].
    pub fn extract_all<P: AsRef<Path>>(&mut self, dest: P) -> Result<()> {
        let dest = dest.as_ref();
        if !dest.exists() {
            fs::create_dir_all(dest)?;
        }

        self.reader.seek(SeekFrom::Start(0))?;
        let mut tar = tar::Archive::new(GzDecoder::new(&mut self.reader));

        for entry in tar.entries().map_err(classify_stream_error)? {
            let mut entry = entry.map_err(classify_stream_error)?;
            let unpacked = entry.unpack_in(dest).map_err(classify_stream_error)?;
            if !unpacked {
                return Err(Error::invalid_format(format!(
                    "entry '{}' escapes the extraction directory",
                    entry_name(&entry)
                )));
            }
        }
        Ok(())
    }

    /// Extract a single entry into the given directory, preserving its
    /// archive path
    ///
    /// Returns the path the entry was written to. Entries whose path would
    /// escape the destination fail with [`Error::InvalidFormat`].
    pub fn extract_file<P: AsRef<Path>>(&mut self, name: &str, dest: P) -> Result<PathBuf> {
        let dest = dest.as_ref();
        if !dest.exists() {
            fs::create_dir_all(dest)?;
        }

        self.reader.seek(SeekFrom::Start(0))?;
        let mut tar = tar::Archive::new(GzDecoder::new(&mut self.reader));

        for entry in tar.entries().map_err(classify_stream_error)? {
            let mut entry = entry.map_err(classify_stream_error)?;
            if entry_name(&entry) == name {
                let unpacked = entry.unpack_in(dest).map_err(classify_stream_error)?;
                if !unpacked {
                    return Err(Error::invalid_format(format!(
                        "entry '{name}' escapes the extraction directory"
                    )));
                }
                return Ok(dest.join(name));
            }
        }

        Err(Error::EntryNotFound(name.to_string()))
    }

    /// Validate the gzip member header and rewind to the start
    fn check_gzip_magic(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;

        let mut header = [0u8; 2];
        self.reader.read_exact(&mut header).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::invalid_format("file too short to be a gzip stream")
            } else {
                Error::Io(e)
            }
        })?;

        if header != magic::GZIP {
            return Err(Error::invalid_format(format!(
                "not a gzip stream (magic bytes {:02x} {:02x}, expected {:02x} {:02x})",
                header[0],
                header[1],
                magic::GZIP[0],
                magic::GZIP[1]
            )));
        }

        self.reader.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

/// Full entry path exactly as stored in the tar header
fn entry_name<R: Read>(entry: &tar::Entry<'_, R>) -> String {
    let bytes = entry.path_bytes();
    match std::str::from_utf8(&bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            log::warn!("entry name contains invalid UTF-8, using lossy conversion");
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

/// Classify an I/O error raised inside the gzip/tar layers
///
/// Corrupt deflate data, bad tar headers, and truncation surface from those
/// layers as `InvalidData`, `InvalidInput`, or `UnexpectedEof`; everything
/// else is a genuine I/O failure.
fn classify_stream_error(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
            Error::invalid_format(format!("malformed archive stream: {err}"))
        }
        _ => Error::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = ChartArchive::open("/nonexistent/chart-0.1.0.tgz");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_from_reader_rejects_non_gzip() {
        let reader = Box::new(Cursor::new(b"definitely not gzip data".to_vec()));
        let result = ChartArchive::from_reader(reader, None);
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_from_reader_rejects_short_input() {
        let reader = Box::new(Cursor::new(vec![0x1F]));
        let result = ChartArchive::from_reader(reader, None);
        match result {
            Err(Error::InvalidFormat(msg)) => assert!(msg.contains("too short")),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_stream_error() {
        let err = classify_stream_error(io::Error::new(io::ErrorKind::InvalidData, "bad crc"));
        assert!(matches!(err, Error::InvalidFormat(_)));

        let err = classify_stream_error(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"));
        assert!(matches!(err, Error::InvalidFormat(_)));

        let err = classify_stream_error(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(err, Error::Io(_)));
    }
}

//! Chart manifest (`Chart.yaml`) parsing

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One record from the manifest's `dependencies` sequence
///
/// All fields are plain strings; a record missing a key deserializes with
/// that field empty rather than failing the whole manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDependency {
    /// Dependency chart name
    #[serde(default)]
    pub name: String,
    /// Repository URL the dependency is fetched from
    #[serde(default)]
    pub repository: String,
    /// Version constraint
    #[serde(default)]
    pub version: String,
}

/// Parsed chart manifest
///
/// Covers the subset of `Chart.yaml` this crate consumes:
/// - Identity fields (`name`, `version`, `apiVersion`, `appVersion`,
///   `description`, `type`), all optional at parse time
/// - The `dependencies` sequence, in document order
/// - Unknown keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartManifest {
    /// Chart API version (`v1` or `v2`)
    #[serde(default, rename = "apiVersion")]
    pub api_version: String,
    /// Chart name
    #[serde(default)]
    pub name: String,
    /// Chart version
    #[serde(default)]
    pub version: String,
    /// Version of the packaged application
    #[serde(default, rename = "appVersion")]
    pub app_version: String,
    /// Single-sentence chart description
    #[serde(default)]
    pub description: String,
    /// Chart type (`application` or `library`)
    #[serde(default, rename = "type")]
    pub chart_type: String,
    /// Declared chart dependencies, in document order
    #[serde(default)]
    pub dependencies: Vec<ChartDependency>,
}

impl ChartManifest {
    /// Check whether a dependency with the given name is declared
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.name == name)
    }

    /// Find the first declared dependency with the given name
    pub fn dependency(&self, name: &str) -> Option<&ChartDependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }
}

/// Parse a chart manifest from YAML text
pub fn parse_manifest(content: &str) -> Result<ChartManifest> {
    let manifest: ChartManifest = serde_yaml::from_str(content)
        .map_err(|e| Error::manifest(format!("error unmarshalling chart content: {e}")))?;

    log::debug!(
        "parsed chart manifest '{}' with {} dependencies",
        manifest.name,
        manifest.dependencies.len()
    );
    Ok(manifest)
}

/// Parse a chart manifest from raw bytes
///
/// Invalid UTF-8 is converted lossily before parsing, matching how entry
/// names are handled.
pub fn parse_manifest_bytes(data: &[u8]) -> Result<ChartManifest> {
    match std::str::from_utf8(data) {
        Ok(content) => parse_manifest(content),
        Err(_) => {
            log::warn!("chart manifest contains invalid UTF-8, using lossy conversion");
            parse_manifest(&String::from_utf8_lossy(data))
        }
    }
}

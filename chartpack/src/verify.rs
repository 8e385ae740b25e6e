//! Chart archive verification
//!
//! A verification pass runs one full entry scan, then checks the observed
//! entries and the chart manifest against a set of expectations. Failed
//! expectations accumulate as issues in the report; only operational
//! failures (I/O, malformed framing) abort the pass with an error.

use crate::archive::{ChartArchive, ChartEntry};
use crate::manifest::ChartManifest;
use crate::{names, Error, Result};

/// Expectations to check an archive against
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Exact entry paths that must be present
    pub required_entries: Vec<String>,
    /// Require at least one CRD document under `<root>/crds/`
    pub require_crds: bool,
    /// Dependency names that must be declared in the chart manifest
    pub required_dependencies: Vec<String>,
}

/// Outcome of one verification pass
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Failed expectations; empty means the archive verified clean
    pub issues: Vec<String>,
    /// Non-fatal observations about chart conventions
    pub warnings: Vec<String>,
    /// Number of entries observed by the scan
    pub entries_scanned: usize,
}

impl VerifyReport {
    /// True when no expectation failed
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Verify a chart archive against the given expectations
///
/// The entry scan completes before any expectation is evaluated, so a
/// missing entry is only reported once the whole archive has been seen.
pub fn verify_archive(
    archive: &mut ChartArchive,
    options: &VerifyOptions,
) -> Result<VerifyReport> {
    let entries = archive.entries()?;
    log::debug!(
        "verifying archive with {} entries against {} required entries",
        entries.len(),
        options.required_entries.len()
    );

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    check_layout(&entries, &mut issues);

    let manifest = load_manifest(archive, &mut issues)?;
    if let Some(manifest) = &manifest {
        check_manifest(manifest, &entries, &mut issues, &mut warnings);
    }

    check_required_entries(&entries, &options.required_entries, &mut issues);

    if options.require_crds {
        check_crds(&entries, &mut issues);
    }

    check_dependencies(
        manifest.as_ref(),
        &options.required_dependencies,
        &mut issues,
    );
    check_conventions(&entries, &mut warnings);

    Ok(VerifyReport {
        issues,
        warnings,
        entries_scanned: entries.len(),
    })
}

/// Check the top-level directory layout
fn check_layout(entries: &[ChartEntry], issues: &mut Vec<String>) {
    if entries.is_empty() {
        issues.push("archive contains no entries".to_string());
        return;
    }

    let mut roots: Vec<&str> = Vec::new();
    for entry in entries {
        if let Some(root) = crate::chart_root(&entry.path) {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
    }

    if roots.len() > 1 {
        issues.push(format!(
            "archive has {} top-level directories, expected one: {}",
            roots.len(),
            roots.join(", ")
        ));
    }
}

/// Load the chart manifest, recording absence or parse failure as an issue
fn load_manifest(
    archive: &mut ChartArchive,
    issues: &mut Vec<String>,
) -> Result<Option<ChartManifest>> {
    match archive.manifest() {
        Ok(manifest) => Ok(Some(manifest)),
        Err(Error::EntryNotFound(_)) => {
            issues.push(format!("chart has no {}", names::CHART_MANIFEST));
            Ok(None)
        }
        Err(Error::Manifest(msg)) => {
            issues.push(format!("{} is not parseable: {}", names::CHART_MANIFEST, msg));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Check manifest identity fields against the archive layout
fn check_manifest(
    manifest: &ChartManifest,
    entries: &[ChartEntry],
    issues: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    if manifest.name.is_empty() {
        issues.push("chart manifest has no name".to_string());
    }
    if manifest.version.is_empty() {
        issues.push("chart manifest has no version".to_string());
    }

    if !manifest.name.is_empty() {
        let root_matches = entries
            .iter()
            .filter_map(|e| crate::chart_root(&e.path))
            .any(|root| root == manifest.name);
        if !root_matches {
            issues.push(format!(
                "chart name '{}' does not match any top-level directory",
                manifest.name
            ));
        }
    }

    for (index, dep) in manifest.dependencies.iter().enumerate() {
        if dep.name.is_empty() {
            warnings.push(format!("manifest dependency #{} has no name", index + 1));
        } else if dep.version.is_empty() {
            warnings.push(format!("dependency '{}' has no version", dep.name));
        }
    }
}

/// Check that every required entry path is present, by exact match
fn check_required_entries(
    entries: &[ChartEntry],
    required: &[String],
    issues: &mut Vec<String>,
) {
    for name in required {
        let found = entries.iter().any(|e| e.path == *name);
        if !found {
            issues.push(format!("{name} was not found in the chart archive"));
        }
    }
}

/// Check for at least one CRD document under `<root>/crds/`
fn check_crds(entries: &[ChartEntry], issues: &mut Vec<String>) {
    let has_crd = entries
        .iter()
        .any(|e| !e.is_dir && is_crd_entry(&e.path));
    if !has_crd {
        issues.push(format!(
            "no custom resource definitions found under {}/",
            names::CRDS_DIR
        ));
    }
}

/// Check that every required dependency is declared in the manifest
fn check_dependencies(
    manifest: Option<&ChartManifest>,
    required: &[String],
    issues: &mut Vec<String>,
) {
    if required.is_empty() {
        return;
    }

    let Some(manifest) = manifest else {
        issues.push("cannot check required dependencies: chart manifest unavailable".to_string());
        return;
    };

    for name in required {
        if !manifest.has_dependency(name) {
            issues.push(format!(
                "required dependency '{name}' is not declared in the chart manifest"
            ));
        }
    }
}

/// Warn about missing chart conventions
fn check_conventions(entries: &[ChartEntry], warnings: &mut Vec<String>) {
    if entries.is_empty() {
        return;
    }

    let has_values = entries
        .iter()
        .any(|e| !e.is_dir && is_root_file(&e.path, names::VALUES_FILE));
    if !has_values {
        warnings.push(format!("chart has no {}", names::VALUES_FILE));
    }

    let has_templates = entries
        .iter()
        .any(|e| in_root_dir(&e.path, names::TEMPLATES_DIR));
    if !has_templates {
        warnings.push(format!("chart has no {}/ entries", names::TEMPLATES_DIR));
    }
}

/// True for `<root>/<file>` paths at depth exactly two
fn is_root_file(path: &str, file: &str) -> bool {
    let mut parts = path.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(root), Some(f), None) if !root.is_empty() && f == file
    )
}

/// True for paths with content below `<root>/<dir>/`
fn in_root_dir(path: &str, dir: &str) -> bool {
    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(root), Some(d), Some(rest)) => !root.is_empty() && d == dir && !rest.is_empty(),
        _ => false,
    }
}

/// True for YAML documents under `<root>/crds/`
fn is_crd_entry(path: &str) -> bool {
    if !path.ends_with(".yaml") && !path.ends_with(".yml") {
        return false;
    }
    in_root_dir(path, names::CRDS_DIR)
}

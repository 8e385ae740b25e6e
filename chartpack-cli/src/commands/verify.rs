//! Verify command implementation

use crate::{output, OutputFormat, GLOBAL_OPTS};
use anyhow::{Context, Result};
use chartpack::{verify_archive, ChartArchive, VerifyOptions};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct VerifyOutcome {
    archive: String,
    valid: bool,
    entries_scanned: usize,
    issues: Vec<String>,
    warnings: Vec<String>,
}

/// Verify a chart archive against the given expectations
///
/// Expectation failures are reported in full before the command exits
/// non-zero; only operational errors abort early.
pub fn verify(
    archive_path: &str,
    required_entries: &[String],
    require_crds: bool,
    required_dependencies: &[String],
) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    if !opts.quiet && opts.output == OutputFormat::Text {
        println!("Verifying chart archive: {}", archive_path);
        println!();
    }

    let mut archive = ChartArchive::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path))?;

    let options = VerifyOptions {
        required_entries: required_entries.to_vec(),
        require_crds,
        required_dependencies: required_dependencies.to_vec(),
    };
    let report = verify_archive(&mut archive, &options)?;

    match opts.output {
        OutputFormat::Json | OutputFormat::Yaml => {
            let outcome = VerifyOutcome {
                archive: archive_path.to_string(),
                valid: report.is_valid(),
                entries_scanned: report.entries_scanned,
                issues: report.issues.clone(),
                warnings: report.warnings.clone(),
            };
            output::print_output(&outcome)?;
        }
        OutputFormat::Text => {
            if !opts.quiet {
                println!("Verification Results:");
                println!("====================");
                println!("Entries scanned: {}", report.entries_scanned);

                if report.issues.is_empty() && report.warnings.is_empty() {
                    println!("✓ Chart archive appears to be valid");
                } else {
                    if !report.issues.is_empty() {
                        println!();
                        println!("Issues found ({}):", report.issues.len());
                        for issue in &report.issues {
                            println!("  ✗ {}", issue);
                        }
                    }

                    if !report.warnings.is_empty() {
                        println!();
                        println!("Warnings ({}):", report.warnings.len());
                        for warning in &report.warnings {
                            println!("  ⚠ {}", warning);
                        }
                    }
                }
            }
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Chart verification failed with {} issues",
            report.issues.len()
        ))
    }
}

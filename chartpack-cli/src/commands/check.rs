//! Check command implementation

use crate::{output, OutputFormat, GLOBAL_OPTS};
use anyhow::{Context, Result};
use chartpack::{resolve, ChartArchive};
use colored::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize)]
struct CheckOutcome {
    archive: String,
    entry: String,
    found: bool,
    entries_scanned: usize,
}

/// Check that an archive contains an entry with the exact given path
pub fn check(entry: &str, archive: Option<&str>) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    let archive_path = resolve_archive_path(archive)?;
    let display_path = archive_path.display().to_string();

    let mut chart = ChartArchive::open(&archive_path)
        .with_context(|| format!("Failed to open archive: {}", display_path))?;

    // Full scan, so framing damage anywhere in the stream still surfaces
    let entries = chart.entries()?;
    let found = entries.iter().any(|e| e.path == entry);

    if matches!(opts.output, OutputFormat::Json | OutputFormat::Yaml) {
        let outcome = CheckOutcome {
            archive: display_path.clone(),
            entry: entry.to_string(),
            found,
            entries_scanned: entries.len(),
        };
        output::print_output(&outcome)?;
    } else if !opts.quiet {
        if found {
            println!(
                "{} {} is present in {}",
                "✓".green().bold(),
                entry.cyan(),
                display_path
            );
        } else {
            println!(
                "{} {} was not found in the chart archive",
                "✗".red().bold(),
                entry
            );
        }
    }

    if found {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} was not found in the chart archive",
            entry
        ))
    }
}

/// Use the explicit path when given, otherwise fall back to $CHART_ARCHIVE
fn resolve_archive_path(archive: Option<&str>) -> Result<PathBuf> {
    match archive {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => resolve::archive_path_from_env(resolve::DEFAULT_ARCHIVE_ENV)
            .context("no archive path was given on the command line"),
    }
}

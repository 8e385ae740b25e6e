//! List command implementation

use crate::{output, OutputFormat, GLOBAL_OPTS};
use anyhow::{Context, Result};
use chartpack::ChartArchive;
use colored::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct EntryRow {
    path: String,
    size: u64,
    directory: bool,
}

#[derive(Serialize, Deserialize)]
struct ArchiveListing {
    path: String,
    total_entries: usize,
    entries: Vec<EntryRow>,
}

/// List entries in a chart archive
pub fn list(archive_path: &str, verbose: bool) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    let mut archive = ChartArchive::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path))?;
    let entries = archive.entries()?;

    // For JSON/YAML output, collect all data first
    if matches!(opts.output, OutputFormat::Json | OutputFormat::Yaml) {
        let listing = ArchiveListing {
            path: archive_path.to_string(),
            total_entries: entries.len(),
            entries: entries
                .into_iter()
                .map(|e| EntryRow {
                    path: e.path,
                    size: e.size,
                    directory: e.is_dir,
                })
                .collect(),
        };
        output::print_output(&listing)?;
        return Ok(());
    }

    if opts.quiet {
        return Ok(());
    }

    // Text output
    if output::use_color() {
        println!("{}: {}", "Archive".bold(), archive_path.cyan());
    } else {
        println!("Archive: {}", archive_path);
    }
    println!();

    if entries.is_empty() {
        println!("{} {}", "⚠".yellow(), "Archive contains no entries".yellow());
        return Ok(());
    }

    if verbose {
        // Detailed listing with entry information
        println!(
            "{:<60} {:>12} {:<6}",
            "Entry".bold().underline(),
            "Size".bold().underline(),
            "Type".bold().underline()
        );

        for entry in &entries {
            let kind = if entry.is_dir {
                "dir".dimmed()
            } else {
                "file".normal()
            };
            println!(
                "{:<60} {:>12} {:<6}",
                entry.path.normal(),
                format_size(entry.size).bright_white(),
                kind
            );
        }
    } else {
        // Simple listing
        for entry in &entries {
            println!("  {}", entry.path);
        }
    }

    println!();
    println!(
        "{}: {}",
        "Total entries".bold(),
        entries.len().to_string().green()
    );

    Ok(())
}

/// Format entry size in human-readable format
fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

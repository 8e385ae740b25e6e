//! Extract command implementation

use crate::{output, OutputFormat, GLOBAL_OPTS};
use anyhow::{Context, Result};
use chartpack::ChartArchive;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize)]
struct ExtractResult {
    archive: String,
    target: String,
    mode: String, // "single" or "all"
    total_entries: usize,
    extracted: usize,
    failed: usize,
    entries: Vec<EntryExtractResult>,
}

#[derive(Serialize, Deserialize)]
struct EntryExtractResult {
    path: String,
    output_path: String,
    size: u64,
    status: String, // "success" or "failed"
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Extract entries from a chart archive
pub fn extract(archive_path: &str, target: &str, specific_entry: Option<&str>) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    if !opts.quiet && opts.output == OutputFormat::Text {
        if output::use_color() {
            println!("{}: {}", "Opening archive".bold(), archive_path.cyan());
        } else {
            println!("Opening archive: {}", archive_path);
        }
    }

    let mut archive = ChartArchive::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path))?;

    // Create target directory if it doesn't exist
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create target directory: {}", target))?;

    if let Some(entry) = specific_entry {
        extract_single_entry(&mut archive, entry, target, archive_path)
    } else {
        extract_all_entries(&mut archive, target, archive_path)
    }
}

/// Extract a single entry from the archive
fn extract_single_entry(
    archive: &mut ChartArchive,
    entry: &str,
    target: &str,
    archive_path: &str,
) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    if !opts.quiet && opts.output == OutputFormat::Text {
        if output::use_color() {
            println!("{}: {}", "Extracting entry".bold(), entry.cyan());
        } else {
            println!("Extracting entry: {}", entry);
        }
    }

    let start_time = std::time::Instant::now();
    let result = archive.extract_file(entry, target);

    match opts.output {
        OutputFormat::Json | OutputFormat::Yaml => {
            let (status, error, output_path, size) = match &result {
                Ok(written) => {
                    let size = fs::metadata(written).map(|m| m.len()).unwrap_or(0);
                    (
                        "success".to_string(),
                        None,
                        written.display().to_string(),
                        size,
                    )
                }
                Err(e) => ("failed".to_string(), Some(e.to_string()), String::new(), 0),
            };

            let extract_result = ExtractResult {
                archive: archive_path.to_string(),
                target: target.to_string(),
                mode: "single".to_string(),
                total_entries: 1,
                extracted: if status == "success" { 1 } else { 0 },
                failed: if status == "failed" { 1 } else { 0 },
                entries: vec![EntryExtractResult {
                    path: entry.to_string(),
                    output_path,
                    size,
                    status,
                    error,
                }],
            };

            output::print_output(&extract_result)?;
        }
        OutputFormat::Text => match &result {
            Ok(written) => {
                let elapsed = start_time.elapsed();
                if !opts.quiet {
                    if output::use_color() {
                        println!(
                            "{} Extracted {} to {} in {:.2}s",
                            "✓".green().bold(),
                            entry.cyan(),
                            written.display(),
                            elapsed.as_secs_f64()
                        );
                    } else {
                        println!(
                            "✓ Extracted {} to {} in {:.2}s",
                            entry,
                            written.display(),
                            elapsed.as_secs_f64()
                        );
                    }
                }
            }
            Err(e) => {
                if output::use_color() {
                    eprintln!(
                        "{} Failed to extract '{}': {}",
                        "✗".red().bold(),
                        entry,
                        e.to_string().red()
                    );
                } else {
                    eprintln!("✗ Failed to extract '{}': {}", entry, e);
                }
            }
        },
    }

    result.map(|_| ()).map_err(Into::into)
}

/// Extract every entry from the archive
fn extract_all_entries(archive: &mut ChartArchive, target: &str, archive_path: &str) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    let entries = archive.entries()?;
    let files: Vec<_> = entries.into_iter().filter(|e| !e.is_dir).collect();

    if files.is_empty() {
        if !opts.quiet && opts.output == OutputFormat::Text {
            eprintln!("Warning: archive contains no file entries");
        }
        return Ok(());
    }

    let total_entries = files.len();

    if !opts.quiet && opts.output == OutputFormat::Text {
        if output::use_color() {
            println!(
                "{} {} entries to extract",
                "Found".green(),
                total_entries.to_string().bright_blue()
            );
        } else {
            println!("Found {} entries to extract", total_entries);
        }
        println!();
    }

    // Create progress bar for text output
    let progress = if !opts.quiet && opts.output == OutputFormat::Text {
        let pb = ProgressBar::new(total_entries as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut extracted_count = 0;
    let mut failed_count = 0;
    let mut entry_results = Vec::new();

    for entry in &files {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Extracting {}", entry.path));
        }

        output::verbose_println(1, &format!("Extracting {} into {}", entry.path, target));

        match archive.extract_file(&entry.path, target) {
            Ok(written) => {
                entry_results.push(EntryExtractResult {
                    path: entry.path.clone(),
                    output_path: written.display().to_string(),
                    size: entry.size,
                    status: "success".to_string(),
                    error: None,
                });
                extracted_count += 1;
            }
            Err(e) => {
                if opts.output == OutputFormat::Text && !opts.quiet && progress.is_none() {
                    println!(
                        "Extracting {} {}: {}",
                        entry.path.cyan(),
                        "FAILED".red().bold(),
                        e.to_string().red()
                    );
                }

                entry_results.push(EntryExtractResult {
                    path: entry.path.clone(),
                    output_path: String::new(),
                    size: 0,
                    status: "failed".to_string(),
                    error: Some(e.to_string()),
                });
                failed_count += 1;
            }
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Extraction complete");
    }

    // Handle output based on format
    match opts.output {
        OutputFormat::Json | OutputFormat::Yaml => {
            let extract_result = ExtractResult {
                archive: archive_path.to_string(),
                target: target.to_string(),
                mode: "all".to_string(),
                total_entries,
                extracted: extracted_count,
                failed: failed_count,
                entries: entry_results,
            };

            output::print_output(&extract_result)?;
        }
        OutputFormat::Text => {
            if !opts.quiet {
                println!();
                println!("{}", "Extraction complete:".bold().underline());

                if output::use_color() {
                    println!(
                        "  {}: {}",
                        "Entries extracted".green(),
                        extracted_count.to_string().green()
                    );
                    println!(
                        "  {}: {}",
                        "Entries failed".red(),
                        failed_count.to_string().red()
                    );
                } else {
                    println!("  Entries extracted: {}", extracted_count);
                    println!("  Entries failed: {}", failed_count);
                }

                if failed_count > 0 {
                    println!();
                    println!(
                        "{}",
                        "Note: entries that would escape the target directory are refused."
                            .yellow()
                    );
                }
            }
        }
    }

    Ok(())
}

//! Manifest command implementation

use crate::{output, OutputFormat, GLOBAL_OPTS};
use anyhow::{Context, Result};
use chartpack::ChartArchive;
use colored::*;

/// Show the parsed chart manifest
pub fn manifest(archive_path: &str) -> Result<()> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    let mut archive = ChartArchive::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path))?;

    let manifest = archive
        .manifest()
        .with_context(|| format!("Failed to read chart manifest from: {}", archive_path))?;

    if matches!(opts.output, OutputFormat::Json | OutputFormat::Yaml) {
        output::print_output(&manifest)?;
        return Ok(());
    }

    if opts.quiet {
        return Ok(());
    }

    println!("{}", "Chart Manifest:".bold().underline());
    print_field("Name", &manifest.name);
    print_field("Version", &manifest.version);
    print_field("API version", &manifest.api_version);
    print_field("App version", &manifest.app_version);
    print_field("Type", &manifest.chart_type);
    print_field("Description", &manifest.description);
    println!();

    if manifest.dependencies.is_empty() {
        println!("No dependencies declared");
    } else {
        println!(
            "{} ({}):",
            "Dependencies".bold(),
            manifest.dependencies.len()
        );
        println!(
            "  {:<24} {:<16} {:<40}",
            "Name".bold().underline(),
            "Version".bold().underline(),
            "Repository".bold().underline()
        );

        for dep in &manifest.dependencies {
            println!(
                "  {:<24} {:<16} {:<40}",
                dep.name.cyan(),
                dep.version.normal(),
                dep.repository.dimmed()
            );
        }
    }

    Ok(())
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        println!("  {}: {}", label.bold(), "(not set)".dimmed());
    } else {
        println!("  {}: {}", label.bold(), value);
    }
}

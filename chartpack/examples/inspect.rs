//! Example: Inspect a packaged Helm chart archive

use chartpack::ChartArchive;
use std::env;
use std::process;

fn main() -> chartpack::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <chart.tgz> [entry]", args[0]);
        process::exit(1);
    }

    let mut archive = ChartArchive::open(&args[1])?;

    let entries = archive.entries()?;
    println!("Archive: {}", args[1]);
    println!("Entries: {}", entries.len());
    for entry in &entries {
        if entry.is_dir {
            println!("  {}", entry.path);
        } else {
            println!("  {} ({} bytes)", entry.path, entry.size);
        }
    }

    match archive.manifest() {
        Ok(manifest) => {
            println!();
            println!("Chart: {} {}", manifest.name, manifest.version);
            if !manifest.dependencies.is_empty() {
                println!("Dependencies:");
                for dep in &manifest.dependencies {
                    println!("  {} {} ({})", dep.name, dep.version, dep.repository);
                }
            }
        }
        Err(e) => {
            println!();
            println!("No readable chart manifest: {}", e);
        }
    }

    // Optional containment check
    if let Some(entry) = args.get(2) {
        println!();
        if archive.contains(entry)? {
            println!("✓ {} is present", entry);
        } else {
            println!("✗ {} was not found in the chart archive", entry);
            process::exit(1);
        }
    }

    Ok(())
}

use crate::{OutputFormat, GLOBAL_OPTS};
use colored::*;
use serde::Serialize;
use std::io;

/// Print output according to the global format settings
pub fn print_output<T: Serialize>(data: &T) -> Result<(), io::Error> {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    if opts.quiet {
        return Ok(());
    }

    match opts.output {
        OutputFormat::Json => print_json(data),
        OutputFormat::Yaml => print_yaml(data),
        OutputFormat::Text => Ok(()), // Text output is handled by individual commands
    }
}

/// Print JSON output
pub fn print_json<T: Serialize>(data: &T) -> Result<(), io::Error> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print YAML output
pub fn print_yaml<T: Serialize>(data: &T) -> Result<(), io::Error> {
    let yaml = serde_yaml::to_string(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    print!("{}", yaml);
    Ok(())
}

/// Print verbose message (only if verbose mode is on)
pub fn verbose_println(level: u8, message: &str) {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");

    if !opts.quiet && opts.verbose >= level {
        eprintln!("{} {}", "[VERBOSE]".dimmed(), message);
    }
}

/// Check if we should use color
pub fn use_color() -> bool {
    let opts = GLOBAL_OPTS.get().expect("Global options not initialized");
    !opts.no_color && opts.output == OutputFormat::Text
}

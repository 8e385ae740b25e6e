//! Chartpack CLI - Command-line tool for inspecting packaged Helm chart archives
//!
//! The binary is named `chartpack-cli` to avoid conflicts with the `chartpack`
//! library crate.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

mod commands;
mod config;
mod output;

// Global context for commands to access
pub static GLOBAL_OPTS: OnceLock<GlobalOptions> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub output: OutputFormat,
    pub verbose: u8,
    pub quiet: bool,
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Parser)]
#[command(
    name = "chartpack-cli",
    about = "Command-line tool for inspecting packaged Helm chart archives",
    long_about = None,
    after_help = "EXAMPLES:
    # List entries in a packaged chart
    chartpack-cli list with-crds-0.1.0.tgz

    # Check that a CRD document is packaged
    chartpack-cli check with-crds/crds/test.crd.yaml -a with-crds-0.1.0.tgz

    # Same check with the archive taken from $CHART_ARCHIVE
    CHART_ARCHIVE=with-crds-0.1.0.tgz chartpack-cli check with-crds/crds/test.crd.yaml

    # Show the parsed chart manifest
    chartpack-cli manifest with-crds-0.1.0.tgz

    # Verify layout, manifest, and required entries
    chartpack-cli verify with-crds-0.1.0.tgz --require with-crds/crds/test.crd.yaml --crds

    # Extract all entries
    chartpack-cli extract with-crds-0.1.0.tgz -t unpacked/

    # Generate shell completions
    chartpack-cli completion bash > ~/.bash_completion.d/chartpack-cli.bash
    chartpack-cli completion zsh > ~/.zsh/completions/_chartpack-cli
    chartpack-cli completion fish > ~/.config/fish/completions/chartpack-cli.fish
    chartpack-cli completion powershell > $PROFILE\\chartpack-cli.ps1

SHELL COMPLETION:
    To enable tab completion, run:

    Bash:
        chartpack-cli completion bash > ~/.bash_completion.d/chartpack-cli.bash
        source ~/.bash_completion.d/chartpack-cli.bash

    Zsh:
        chartpack-cli completion zsh > ~/.zsh/completions/_chartpack-cli
        # Add to ~/.zshrc: fpath=(~/.zsh/completions $fpath)

    Fish:
        chartpack-cli completion fish > ~/.config/fish/completions/chartpack-cli.fish

    PowerShell:
        chartpack-cli completion powershell >> $PROFILE"
)]
#[command(version)]
struct Cli {
    /// Output format (defaults to the configuration file setting, then text)
    #[arg(global = true, short = 'o', long, value_enum)]
    output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(global = true, short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(global = true, short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output
    #[arg(global = true, long)]
    no_color: bool,

    /// Path to a configuration file
    #[arg(global = true, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entries in a chart archive
    List {
        /// Path to the chart archive (.tgz)
        archive: String,
    },
    /// Check that an archive contains an exact entry path
    Check {
        /// Full entry path, including the chart root directory
        entry: String,
        /// Path to the chart archive (falls back to $CHART_ARCHIVE)
        #[arg(short = 'a', long, env = chartpack::resolve::DEFAULT_ARCHIVE_ENV)]
        archive: Option<String>,
    },
    /// Show the parsed chart manifest
    Manifest {
        /// Path to the chart archive (.tgz)
        archive: String,
    },
    /// Verify chart layout, manifest, and required entries
    Verify {
        /// Path to the chart archive (.tgz)
        archive: String,
        /// Entry path that must be present (can be used multiple times)
        #[arg(short = 'r', long = "require")]
        required_entries: Vec<String>,
        /// Require at least one CRD document under crds/
        #[arg(long)]
        crds: bool,
        /// Dependency that must be declared in the manifest (can be used multiple times)
        #[arg(long = "require-dependency")]
        required_dependencies: Vec<String>,
    },
    /// Extract entries from a chart archive
    Extract {
        /// Path to the chart archive (.tgz)
        archive: String,
        /// Target directory
        #[arg(short, long, default_value = ".")]
        target: String,
        /// Specific entry to extract (if not specified, extracts all)
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Generate shell completion scripts
    #[command(about = "Generate completion scripts for your shell")]
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_ref())?;

    // Explicit flag wins, then the configuration file, then text
    let output = cli
        .output
        .or_else(|| config.output_format())
        .unwrap_or(OutputFormat::Text);

    // Set up colored output based on flags
    if cli.no_color || output != OutputFormat::Text {
        colored::control::set_override(false);
    }

    // Configure logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Store global options for commands to access
    let global_opts = GlobalOptions {
        output,
        verbose: cli.verbose,
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    GLOBAL_OPTS
        .set(global_opts)
        .expect("Failed to set global options");

    // Execute command
    match cli.command {
        Commands::List { archive } => {
            let verbose = cli.verbose > 0;
            commands::list::list(&archive, verbose)?;
        }
        Commands::Check { entry, archive } => {
            commands::check::check(&entry, archive.as_deref())?;
        }
        Commands::Manifest { archive } => {
            commands::manifest::manifest(&archive)?;
        }
        Commands::Verify {
            archive,
            required_entries,
            crds,
            required_dependencies,
        } => {
            // Configuration supplies defaults when the flags are absent
            let mut required = required_entries;
            if required.is_empty() {
                if let Some(defaults) = config.required_entries.clone() {
                    required = defaults;
                }
            }
            let require_crds = crds || config.require_crds.unwrap_or(false);

            commands::verify::verify(&archive, &required, require_crds, &required_dependencies)?;
        }
        Commands::Extract {
            archive,
            target,
            file,
        } => {
            commands::extract::extract(&archive, &target, file.as_deref())?;
        }
        Commands::Completion { shell } => {
            // Generate completion script for the specified shell
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}

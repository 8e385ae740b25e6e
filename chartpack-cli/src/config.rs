//! Configuration file support

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (text, json, yaml)
    pub default_output: Option<String>,

    /// Entry paths `verify` requires when none are given on the command line
    pub required_entries: Option<Vec<String>>,

    /// Whether `verify` requires CRD documents by default
    pub require_crds: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output: Some("text".to_string()),
            required_entries: None,
            require_crds: None,
        }
    }
}

impl Config {
    /// Parse the configured default output format, if any
    pub fn output_format(&self) -> Option<crate::OutputFormat> {
        self.default_output
            .as_deref()
            .and_then(|name| crate::OutputFormat::from_str(name, true).ok())
    }
}

/// Load configuration from file or defaults
pub fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config_path = if let Some(p) = path {
        p.clone()
    } else {
        // Try default locations
        if let Some(home) = dirs::home_dir() {
            let chartpack_config = home.join(".chartpack").join("config.toml");
            if chartpack_config.exists() {
                chartpack_config
            } else {
                let config_dir = home.join(".config").join("chartpack").join("config.toml");
                if config_dir.exists() {
                    config_dir
                } else {
                    // Return default config if no file found
                    return Ok(Config::default());
                }
            }
        } else {
            return Ok(Config::default());
        }
    };

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

/// Save configuration to file
#[allow(dead_code)]
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)?;
    Ok(())
}

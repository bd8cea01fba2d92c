//! Report run configuration, stored as a TOML file.
//!
//! Points at the snapshot files to load and where artifacts go. Every
//! field has a default so an empty file is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Run configuration for report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Path to the portfolio library snapshot (JSON).
    pub portfolios: PathBuf,
    /// Path to the asset library snapshot (JSON).
    pub assets: PathBuf,
    /// Report only this portfolio. `None` reports all of them.
    pub portfolio: Option<String>,
    /// Directory artifact bundles are written under.
    pub output_dir: PathBuf,
    /// Whether `report` also writes the artifact bundle to disk.
    pub save_artifacts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            portfolios: PathBuf::from("portfolios.json"),
            assets: PathBuf::from("assets.json"),
            portfolio: None,
            output_dir: PathBuf::from("reports"),
            save_artifacts: true,
        }
    }
}

impl ReportConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

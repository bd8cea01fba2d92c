//! Snapshot loading — JSON files supplying the read-only portfolio and
//! asset libraries.
//!
//! The engine never performs I/O itself; these loaders are the inbound
//! collaborators that hand it immutable snapshots.

use std::path::Path;

use thiserror::Error;

use lotlab_core::domain::{AssetLibrary, PortfolioLibrary};

/// Snapshot loading failure.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Loads a portfolio library snapshot (map of name → portfolio).
pub fn load_portfolio_library(path: &Path) -> Result<PortfolioLibrary, LoadError> {
    read_json(path)
}

/// Loads an asset library snapshot (map of asset id → metadata).
pub fn load_asset_library(path: &Path) -> Result<AssetLibrary, LoadError> {
    read_json(path)
}

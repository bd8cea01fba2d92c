//! Asset metadata and the asset library snapshot.

use super::ids::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive metadata for one tradable asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub display_name: String,
    pub isin: String,
    pub wkn: Option<String>,
}

/// Read-only snapshot of all known assets, keyed by id.
///
/// An order may reference an asset id absent from the library (partially
/// loaded data); lookups degrade to a placeholder label instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLibrary {
    pub assets: BTreeMap<AssetId, Asset>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, asset: Asset) {
        self.assets.insert(id, asset);
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.get(id)
    }

    /// Display label for an asset id, falling back to the raw id when the
    /// asset is not in the library.
    pub fn label_for(&self, id: &AssetId) -> String {
        match self.assets.get(id) {
            Some(asset) => asset.display_name.clone(),
            None => id.to_string(),
        }
    }
}

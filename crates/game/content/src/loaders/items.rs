//! Item catalog loader.

use std::path::Path;

use battle_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<(String, ItemDefinition)>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Returns
    ///
    /// Returns a Vec of (item_id, ItemDefinition). Loot tables reference
    /// items by the id, not the display name.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, ItemDefinition)>> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }
}

//! Item catalog implementing [`battle_core::ItemOracle`].

use battle_core::{ItemDefinition, ItemOracle};
use std::collections::HashMap;

/// ItemOracle implementation over a static item catalog.
pub struct ItemOracleImpl {
    definitions: HashMap<String, ItemDefinition>,
}

impl ItemOracleImpl {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Build an oracle from a loaded catalog of (id, definition) pairs.
    pub fn from_catalog(catalog: impl IntoIterator<Item = (String, ItemDefinition)>) -> Self {
        Self {
            definitions: catalog.into_iter().collect(),
        }
    }

    /// Add a single item definition.
    pub fn add_definition(&mut self, id: impl Into<String>, definition: ItemDefinition) {
        self.definitions.insert(id.into(), definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ItemOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemOracle for ItemOracleImpl {
    fn definition(&self, id: &str) -> Option<ItemDefinition> {
        self.definitions.get(id).cloned()
    }
}

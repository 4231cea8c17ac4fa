//! Item definitions and the oracle interface that resolves loot references.

/// Oracle providing item definitions for loot resolution.
///
/// Loot-table entries reference items by definition id (e.g.
/// `"health_potion"`). The runtime implements this over the authored item
/// catalog; loot rolls resolve references through it so the rules crate
/// never owns the catalog.
pub trait ItemOracle: Send + Sync {
    /// Returns the item definition for a given definition id.
    fn definition(&self, id: &str) -> Option<ItemDefinition>;
}

/// Item definition with common fields and type-specific data.
///
/// # Design: Base + Kind Pattern
///
/// - Base struct holds common fields (name, description, value)
/// - `kind` enum holds type-specific data (restore amounts, equip bonuses)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    pub description: String,
    /// Buy/sell price.
    pub value: u32,
    pub kind: ItemKind,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, value: u32, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
            kind,
        }
    }
}

/// Item type with type-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Consumable item (potions, food).
    Consumable {
        health_restore: u32,
        mana_restore: u32,
    },

    /// Equippable weapon.
    Weapon { attack_bonus: i32 },

    /// Equippable armor.
    Armor { defense_bonus: i32, speed_bonus: i32 },

    /// Quest-relevant item with no combat effect.
    KeyItem,
}

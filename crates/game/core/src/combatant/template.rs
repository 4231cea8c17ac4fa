//! Combatant template definitions.
//!
//! This module provides `CombatantTemplate` for defining enemies in a
//! data-driven way. Templates can be serialized from RON files and spawned
//! into `CombatantInstance` values at battle start.
//!
//! Authored fields are signed so that malformed data (a negative stat typed
//! into a data file) is representable and rejected in one place:
//! [`CombatantTemplate::instantiate`].

use arrayvec::ArrayVec;

use crate::combatant::instance::{CombatantInstance, SpecialAttack, StatBlock};
use crate::config::BattleConfig;
use crate::loot::DropEntry;

/// Errors raised when authored combatant data fails validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCombatant {
    #[error("combatant '{name}': stat '{field}' is negative ({value})")]
    NegativeStat {
        name: String,
        field: &'static str,
        value: i32,
    },

    #[error("combatant '{name}': max health must be at least 1 (got {value})")]
    NonPositiveMaxHealth { name: String, value: i32 },

    #[error("combatant '{name}': '{field}' must be within 0-100 (got {value})")]
    ChanceOutOfRange {
        name: String,
        field: &'static str,
        value: i32,
    },

    #[error("combatant '{name}': loot quantity range {min}-{max} is invalid")]
    InvalidQuantityRange { name: String, min: i32, max: i32 },
}

/// Special-attack profile of an enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttackProfile {
    /// Chance to use the special attack instead of a basic attack (0-100).
    pub chance: i32,
    pub damage: i32,
    pub name: String,
}

/// One authored loot-table entry.
///
/// `item` references an item definition id; entries without one are legal
/// and never drop anything.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: Option<String>,
    /// Drop chance percentage (0-100).
    pub drop_chance: i32,
    pub min_quantity: i32,
    pub max_quantity: i32,
}

/// Combatant template defining an enemy's stats, rewards, AI behavior,
/// loot table, and encounter weight.
///
/// This type can be serialized directly from RON files. It is never mutated
/// at runtime; battles operate on instances spawned from it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Determines turn order (higher acts first).
    pub speed: i32,
    pub experience_reward: i32,
    pub gold_reward: i32,
    pub special: SpecialAttackProfile,
    pub loot: ArrayVec<LootEntry, { BattleConfig::MAX_LOOT_ENTRIES }>,
    /// How common this enemy is in random encounters (higher = more common).
    pub encounter_weight: i32,
}

impl CombatantTemplate {
    /// Create a runtime instance from this template.
    ///
    /// Deep-copies every stat field, validates it, and starts the instance
    /// at full health. The template itself is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCombatant`] on the first malformed field: negative
    /// stats or rewards, non-positive max health, out-of-range percentages,
    /// or inverted loot quantity ranges. A battle must not start from data
    /// that failed here.
    pub fn instantiate(&self) -> Result<CombatantInstance, InvalidCombatant> {
        let max_health = self.positive(self.max_health)?;
        let stats = StatBlock {
            max_health,
            attack: self.non_negative("attack", self.attack)?,
            defense: self.non_negative("defense", self.defense)?,
            speed: self.non_negative("speed", self.speed)?,
        };

        let special = SpecialAttack {
            chance: self.chance("special.chance", self.special.chance)?,
            damage: self.non_negative("special.damage", self.special.damage)?,
            name: self.special.name.clone(),
        };

        let mut loot = Vec::with_capacity(self.loot.len());
        for entry in &self.loot {
            if entry.min_quantity < 0 || entry.min_quantity > entry.max_quantity {
                return Err(InvalidCombatant::InvalidQuantityRange {
                    name: self.name.clone(),
                    min: entry.min_quantity,
                    max: entry.max_quantity,
                });
            }
            loot.push(DropEntry {
                item: entry.item.clone(),
                chance: self.chance("loot.drop_chance", entry.drop_chance)?,
                min_quantity: entry.min_quantity as u32,
                max_quantity: entry.max_quantity as u32,
            });
        }

        Ok(CombatantInstance::new(
            self.name.clone(),
            stats,
            special,
            self.non_negative("experience_reward", self.experience_reward)?,
            self.non_negative("gold_reward", self.gold_reward)?,
            loot,
        ))
    }

    fn positive(&self, value: i32) -> Result<u32, InvalidCombatant> {
        if value < 1 {
            return Err(InvalidCombatant::NonPositiveMaxHealth {
                name: self.name.clone(),
                value,
            });
        }
        Ok(value as u32)
    }

    fn non_negative(&self, field: &'static str, value: i32) -> Result<u32, InvalidCombatant> {
        if value < 0 {
            return Err(InvalidCombatant::NegativeStat {
                name: self.name.clone(),
                field,
                value,
            });
        }
        Ok(value as u32)
    }

    fn chance(&self, field: &'static str, value: i32) -> Result<u32, InvalidCombatant> {
        if !(0..=100).contains(&value) {
            return Err(InvalidCombatant::ChanceOutOfRange {
                name: self.name.clone(),
                field,
                value,
            });
        }
        Ok(value as u32)
    }

    /// Create a builder for constructing templates.
    pub fn builder() -> CombatantTemplateBuilder {
        CombatantTemplateBuilder::default()
    }
}

/// Builder for constructing combatant templates.
///
/// Defaults match a garden-variety early-game enemy so tests only override
/// what they exercise.
pub struct CombatantTemplateBuilder {
    name: String,
    max_health: i32,
    attack: i32,
    defense: i32,
    speed: i32,
    experience_reward: i32,
    gold_reward: i32,
    special: SpecialAttackProfile,
    loot: ArrayVec<LootEntry, { BattleConfig::MAX_LOOT_ENTRIES }>,
    encounter_weight: i32,
}

impl Default for CombatantTemplateBuilder {
    fn default() -> Self {
        Self {
            name: "Enemy".into(),
            max_health: 50,
            attack: 8,
            defense: 3,
            speed: 5,
            experience_reward: 50,
            gold_reward: 25,
            special: SpecialAttackProfile {
                chance: 30,
                damage: 15,
                name: "Power Attack".into(),
            },
            loot: ArrayVec::new(),
            encounter_weight: 50,
        }
    }
}

impl CombatantTemplateBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn max_health(mut self, max_health: i32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn attack(mut self, attack: i32) -> Self {
        self.attack = attack;
        self
    }

    pub fn defense(mut self, defense: i32) -> Self {
        self.defense = defense;
        self
    }

    pub fn speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn rewards(mut self, experience: i32, gold: i32) -> Self {
        self.experience_reward = experience;
        self.gold_reward = gold;
        self
    }

    pub fn special(mut self, chance: i32, damage: i32, name: impl Into<String>) -> Self {
        self.special = SpecialAttackProfile {
            chance,
            damage,
            name: name.into(),
        };
        self
    }

    /// Append a loot entry. Panics if the table is already full; authored
    /// data goes through serde instead of this builder.
    pub fn loot_entry(
        mut self,
        item: Option<&str>,
        drop_chance: i32,
        min_quantity: i32,
        max_quantity: i32,
    ) -> Self {
        self.loot.push(LootEntry {
            item: item.map(str::to_owned),
            drop_chance,
            min_quantity,
            max_quantity,
        });
        self
    }

    pub fn encounter_weight(mut self, weight: i32) -> Self {
        self.encounter_weight = weight;
        self
    }

    pub fn build(self) -> CombatantTemplate {
        CombatantTemplate {
            name: self.name,
            max_health: self.max_health,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            experience_reward: self.experience_reward,
            gold_reward: self.gold_reward,
            special: self.special,
            loot: self.loot,
            encounter_weight: self.encounter_weight,
        }
    }
}

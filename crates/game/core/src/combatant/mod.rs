//! Combatant model: authored templates, runtime instances, player state.
//!
//! Templates are read-only authored data; every battle spawns a fresh
//! [`CombatantInstance`] from one via [`CombatantTemplate::instantiate`],
//! which is also where malformed authored data is rejected. The player side
//! persists across battles as [`PlayerProgressState`].

mod instance;
mod player;
mod template;

pub use instance::{CombatantInstance, SpecialAttack, StatBlock};
pub use player::{PlayerProgressState, ResourceMeter, ReturnLocation, WorldPosition};
pub use template::{
    CombatantTemplate, CombatantTemplateBuilder, InvalidCombatant, LootEntry, SpecialAttackProfile,
};

//! Deterministic combat rules shared across the runtime and offline tools.
//!
//! `battle-core` defines the canonical rules of a turn-based encounter: the
//! combatant model, damage formulas, the enemy decision policy, loot
//! resolution, the battle state machine, and the overworld encounter
//! trigger. All randomness flows through [`env::RngOracle`], so every battle
//! is replayable from a seed. State mutation flows through
//! [`battle::BattleSession`], and supporting crates depend on the types
//! re-exported here.
pub mod battle;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod encounter;
pub mod env;
pub mod loot;

pub use battle::{
    ActionOutcome, BattleEvent, BattleSession, BattleState, PendingResolution, TerminalSignal,
    VictoryRewards,
};
pub use combat::{
    Actor, EnemyAction, choose_enemy_action, determine_first_actor, mitigate_damage,
    player_attack_damage,
};
pub use combatant::{
    CombatantInstance, CombatantTemplate, CombatantTemplateBuilder, InvalidCombatant, LootEntry,
    PlayerProgressState, ResourceMeter, ReturnLocation, SpecialAttack, SpecialAttackProfile,
    StatBlock, WorldPosition,
};
pub use config::BattleConfig;
pub use encounter::{EncounterConfig, EncounterError, EncounterTracker};
pub use env::{ItemDefinition, ItemKind, ItemOracle, PcgRng, RngOracle, compute_seed};
pub use loot::{DropEntry, SelectionError, roll_drops, select_weighted};

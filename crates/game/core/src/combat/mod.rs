//! Combat resolution primitives.
//!
//! This module provides pure functions for resolving combat interactions.
//! All combat logic is deterministic and side-effect free: random draws are
//! made by the caller and passed in as plain values.
//!
//! # Core Functions
//!
//! - `mitigate_damage`: defense reduction with a guaranteed damage floor
//! - `player_attack_damage`: variance-scaled player damage
//! - `determine_first_actor`: speed-based turn order
//! - `choose_enemy_action`: chance-based enemy action policy

mod ai;
mod damage;
mod turn;

pub use ai::{EnemyAction, choose_enemy_action};
pub use damage::{mitigate_damage, player_attack_damage};
pub use turn::{Actor, determine_first_actor};

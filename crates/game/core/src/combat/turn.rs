//! Turn-order determination.

use strum::Display;

/// The two sides of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actor {
    Player,
    Enemy,
}

impl Actor {
    /// Stable id used when deriving per-actor RNG seeds.
    pub const fn id(self) -> u32 {
        match self {
            Actor::Player => 0,
            Actor::Enemy => 1,
        }
    }
}

/// Decide who takes the first turn.
///
/// The faster combatant acts first; a speed tie goes to the player.
pub fn determine_first_actor(player_speed: u32, enemy_speed: u32) -> Actor {
    if player_speed >= enemy_speed {
        Actor::Player
    } else {
        Actor::Enemy
    }
}

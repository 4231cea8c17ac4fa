//! Observational events emitted by the battle state machine.
//!
//! Events are returned from each resolved action in order. They carry
//! everything presentation and progression collaborators need; the session
//! itself never calls out, so a missing collaborator costs nothing.

use crate::combatant::{ResourceMeter, ReturnLocation};
use crate::env::ItemDefinition;

/// Reward payload handed to the progression collaborator on victory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryRewards {
    pub experience: u32,
    pub gold: u32,
    /// One entry per dropped unit, already resolved to definitions.
    pub items: Vec<ItemDefinition>,
}

/// Terminal outcome signal carrying the destination context.
///
/// Navigation itself belongs to the overworld collaborator subscribed to
/// this signal; the state machine only reports where control should go.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminalSignal {
    Victory { return_location: ReturnLocation },
    Fled { return_location: ReturnLocation },
    GameOver,
}

/// One observational callback from the battle to the outside world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A battle was initialized with the two display names.
    Started {
        player_name: String,
        enemy_name: String,
    },

    /// Ordered log line for the battle log.
    Log(String),

    /// Player health or mana changed.
    PlayerVitalsChanged {
        health: ResourceMeter,
        mana: ResourceMeter,
    },

    /// Enemy health changed.
    EnemyHealthChanged { health: ResourceMeter },

    /// Action buttons should be enabled or disabled.
    InputEnabled(bool),

    /// Victory rewards computed and ready for the progression collaborator.
    RewardsGranted(VictoryRewards),

    /// The session reached a terminal state.
    Terminal(TerminalSignal),
}

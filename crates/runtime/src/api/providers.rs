//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`PlayerActionProvider`] implementations so a
//! battle can run with human input, scripted fixtures, or AI policies.

use async_trait::async_trait;
use battle_core::BattleSession;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A command the player can issue on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Attack,
    Flee,
}

/// Trait for providing the player's next command.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed commands
/// - Testing fixtures
#[async_trait]
pub trait PlayerActionProvider: Send + Sync {
    /// Provide the next command based on the current battle.
    ///
    /// Called only when it is the player's turn; the session is passed
    /// read-only for inspection (own health, enemy health).
    async fn next_command(&self, session: &BattleSession) -> PlayerCommand;
}

/// Provider that always attacks. Useful for testing or as a fallback.
pub struct AttackProvider;

#[async_trait]
impl PlayerActionProvider for AttackProvider {
    async fn next_command(&self, _session: &BattleSession) -> PlayerCommand {
        PlayerCommand::Attack
    }
}

/// Provider replaying a fixed command sequence, attacking once exhausted.
pub struct ScriptedProvider {
    commands: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedProvider {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PlayerActionProvider for ScriptedProvider {
    async fn next_command(&self, _session: &BattleSession) -> PlayerCommand {
        self.commands
            .lock()
            .expect("scripted command queue poisoned")
            .pop_front()
            .unwrap_or(PlayerCommand::Attack)
    }
}

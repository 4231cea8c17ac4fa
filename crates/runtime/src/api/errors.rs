//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from encounter triggering, combatant validation, and
//! content loading so clients can bubble them up with consistent context.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("encounter trigger aborted: {0}")]
    Encounter(#[from] battle_core::EncounterError),

    #[error("combatant rejected at instantiation: {0}")]
    InvalidCombatant(#[from] battle_core::InvalidCombatant),

    #[error("handoff snapshot encoding failed")]
    HandoffEncode(#[source] bincode::Error),

    #[error("handoff snapshot decoding failed")]
    HandoffDecode(#[source] bincode::Error),

    #[error("handoff snapshot JSON conversion failed")]
    HandoffJson(#[source] serde_json::Error),

    #[error("unknown enemy id '{0}' in catalog")]
    UnknownEnemy(String),

    #[error("content loading failed: {0}")]
    Content(#[from] anyhow::Error),
}

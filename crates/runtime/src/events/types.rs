//! Event types for different topics.
//!
//! Battle events come straight from battle-core; this module only defines
//! the events the runtime itself originates.

use serde::{Deserialize, Serialize};

/// Events related to the overworld encounter trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// A random encounter triggered against the named enemy.
    Triggered { enemy_id: String },

    /// The step counter was reset after a battle ended.
    CounterReset,
}

//! Serialized snapshot at the overworld/battle boundary.
//!
//! This is the sole persisted-state contract between the encounter trigger
//! and the battle: the chosen template plus where the overworld resumes.
//! It must round-trip exactly, field for field; the tests hold both the
//! binary and the JSON codec to that.

use battle_core::{CombatantTemplate, ReturnLocation};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

/// Everything the battle side needs from the overworld side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterHandoff {
    /// Catalog id of the chosen enemy.
    pub enemy_id: String,
    pub template: CombatantTemplate,
    pub return_location: ReturnLocation,
}

impl EncounterHandoff {
    pub fn new(
        enemy_id: impl Into<String>,
        template: CombatantTemplate,
        return_location: ReturnLocation,
    ) -> Self {
        Self {
            enemy_id: enemy_id.into(),
            template,
            return_location,
        }
    }

    /// Encode to the compact binary wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(RuntimeError::HandoffEncode)
    }

    /// Decode from the binary wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(RuntimeError::HandoffDecode)
    }

    /// Encode to JSON for inspection and debugging.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RuntimeError::HandoffJson)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RuntimeError::HandoffJson)
    }
}

//! Game tuning loader.

use std::path::Path;

use battle_core::{BattleConfig, EncounterConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Presentation pacing, in milliseconds.
///
/// These pauses exist so a human can read the battle log; they are not game
/// logic, and headless runs set them to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingTuning {
    /// Pause before the enemy acts.
    pub enemy_turn_delay_ms: u64,
    /// Pause on the victory screen before returning to the overworld.
    pub victory_delay_ms: u64,
    /// Pause before the game-over transition.
    pub defeat_delay_ms: u64,
}

impl Default for PacingTuning {
    fn default() -> Self {
        Self {
            enemy_turn_delay_ms: 1_000,
            victory_delay_ms: 3_000,
            defeat_delay_ms: 2_000,
        }
    }
}

/// Overworld movement tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverworldTuning {
    /// World-unit distance that counts as one step.
    pub step_distance: f32,
}

impl Default for OverworldTuning {
    fn default() -> Self {
        Self { step_distance: 0.5 }
    }
}

/// Complete tuning document loaded from `config.toml`.
///
/// Every section is optional in the file; omitted sections fall back to the
/// defaults the rules crates define.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GameTuning {
    #[serde(default)]
    pub battle: BattleConfig,
    #[serde(default)]
    pub encounter: EncounterConfig,
    #[serde(default)]
    pub pacing: PacingTuning,
    #[serde(default)]
    pub overworld: OverworldTuning,
}

/// Loader for game tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameTuning> {
        let content = read_file(path)?;
        let tuning: GameTuning = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tuning TOML: {}", e))?;

        Ok(tuning)
    }
}

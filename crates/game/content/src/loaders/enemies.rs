//! Enemy catalog loader.
//!
//! Loads combatant templates from RON files. Templates are validated lazily
//! at instantiation, so the loader only cares about shape; a battle started
//! from a malformed entry still fails fast in battle-core.

use std::path::Path;

use battle_core::CombatantTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for enemy catalog from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy catalog from a RON file.
    ///
    /// RON format: `Vec<(String, CombatantTemplate)>`, keyed by definition
    /// id (e.g. `"slime"`, `"dire_wolf"`).
    ///
    /// # Returns
    ///
    /// Returns a Vec of (enemy_id, CombatantTemplate).
    pub fn load(path: &Path) -> LoadResult<Vec<(String, CombatantTemplate)>> {
        let content = read_file(path)?;
        let catalog: Vec<(String, CombatantTemplate)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"[
    ("slime", (
        name: "Slime",
        max_health: 35,
        attack: 6,
        defense: 2,
        speed: 4,
        experience_reward: 30,
        gold_reward: 15,
        special: (chance: 15, damage: 10, name: "Acid Splash"),
        loot: [
            (item: Some("health_potion"), drop_chance: 40, min_quantity: 1, max_quantity: 2),
        ],
        encounter_weight: 60,
    )),
]"#;

    #[test]
    fn parses_a_catalog_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let enemies = EnemyLoader::load(file.path()).unwrap();
        assert_eq!(enemies.len(), 1);

        let (id, slime) = &enemies[0];
        assert_eq!(id, "slime");
        assert_eq!(slime.name, "Slime");
        assert_eq!(slime.special.name, "Acid Splash");
        assert_eq!(slime.loot.len(), 1);
        assert_eq!(slime.loot[0].item.as_deref(), Some("health_potion"));

        // Loaded templates spawn cleanly
        let instance = slime.instantiate().unwrap();
        assert_eq!(instance.current_health(), 35);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = EnemyLoader::load(Path::new("/nonexistent/enemies.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/enemies.ron"));
    }
}

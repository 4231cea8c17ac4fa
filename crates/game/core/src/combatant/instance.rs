//! Runtime combatant instances and damage application.

use crate::combat::mitigate_damage;
use crate::loot::DropEntry;

/// Validated, unsigned stat block of a spawned combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Validated special-attack data of a spawned combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttack {
    pub chance: u32,
    pub damage: u32,
    pub name: String,
}

/// Mutable battle participant spawned from a `CombatantTemplate`.
///
/// Holds the only mutable combat state on the enemy side: `current_health`,
/// with the invariant `0 <= current_health <= stats.max_health` maintained
/// by every mutation. Discarded when the battle ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantInstance {
    name: String,
    stats: StatBlock,
    current_health: u32,
    special: SpecialAttack,
    experience_reward: u32,
    gold_reward: u32,
    loot: Vec<DropEntry>,
}

impl CombatantInstance {
    pub(crate) fn new(
        name: String,
        stats: StatBlock,
        special: SpecialAttack,
        experience_reward: u32,
        gold_reward: u32,
        loot: Vec<DropEntry>,
    ) -> Self {
        Self {
            name,
            current_health: stats.max_health,
            stats,
            special,
            experience_reward,
            gold_reward,
            loot,
        }
    }

    /// Apply incoming damage after defense mitigation.
    ///
    /// Subtracts `max(1, incoming - defense/2)` from current health,
    /// clamping at zero, and returns the realized damage for logging.
    pub fn apply_damage(&mut self, incoming: u32) -> u32 {
        let actual = mitigate_damage(incoming, self.stats.defense);
        self.current_health = self.current_health.saturating_sub(actual);
        actual
    }

    /// True once current health reached zero.
    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn special(&self) -> &SpecialAttack {
        &self.special
    }

    pub fn experience_reward(&self) -> u32 {
        self.experience_reward
    }

    pub fn gold_reward(&self) -> u32 {
        self.gold_reward
    }

    pub fn loot(&self) -> &[DropEntry] {
        &self.loot
    }
}

#[cfg(test)]
mod tests {
    use crate::combatant::CombatantTemplate;

    #[test]
    fn damage_floor_is_one() {
        // Defense far exceeds the hit; at least 1 damage still lands.
        let mut enemy = CombatantTemplate::builder()
            .max_health(50)
            .defense(100)
            .build()
            .instantiate()
            .unwrap();

        assert_eq!(enemy.apply_damage(2), 1);
        assert_eq!(enemy.current_health(), 49);
    }

    #[test]
    fn health_clamps_at_zero() {
        let mut enemy = CombatantTemplate::builder()
            .max_health(10)
            .defense(0)
            .build()
            .instantiate()
            .unwrap();

        let actual = enemy.apply_damage(500);
        assert_eq!(actual, 500);
        assert_eq!(enemy.current_health(), 0);
        assert!(enemy.is_defeated());

        // Further hits keep the invariant
        enemy.apply_damage(10);
        assert_eq!(enemy.current_health(), 0);
    }

    #[test]
    fn mitigation_uses_half_defense_rounded_down() {
        let mut enemy = CombatantTemplate::builder()
            .max_health(50)
            .defense(3)
            .build()
            .instantiate()
            .unwrap();

        // 10 - floor(3/2) = 9
        assert_eq!(enemy.apply_damage(10), 9);
        assert_eq!(enemy.current_health(), 41);
    }

    #[test]
    fn repeated_damage_never_escapes_bounds() {
        let mut enemy = CombatantTemplate::builder()
            .max_health(30)
            .defense(4)
            .build()
            .instantiate()
            .unwrap();

        for hit in [0u32, 1, 7, 100, 3] {
            enemy.apply_damage(hit);
            assert!(enemy.current_health() <= enemy.stats().max_health);
        }
        assert!(enemy.is_defeated());
    }
}

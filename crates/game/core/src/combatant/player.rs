//! Persistent player state carried between battles.

use crate::combat::mitigate_damage;

/// Integer resource meter (health, mana) tracked on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    /// Meter filled to its maximum.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }
}

/// Overworld position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where the overworld resumes after a battle ends.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnLocation {
    pub scene: String,
    pub position: WorldPosition,
}

impl ReturnLocation {
    pub fn new(scene: impl Into<String>, position: WorldPosition) -> Self {
        Self {
            scene: scene.into(),
            position,
        }
    }
}

impl Default for ReturnLocation {
    fn default() -> Self {
        Self {
            scene: "Overworld".into(),
            position: WorldPosition::default(),
        }
    }
}

/// Player progression state that persists across battles.
///
/// Owned by the overworld session; the combat engine borrows it, damages it
/// during enemy turns, and hands experience to it on victory. Leveling and
/// skill spending happen outside the combat engine; the fields live here so
/// the whole player sheet round-trips as one value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProgressState {
    pub name: String,
    pub level: u32,
    pub experience: u32,

    pub health: ResourceMeter,
    pub mana: ResourceMeter,

    // Base stats before equipment or skill bonuses.
    pub base_attack: i32,
    pub base_defense: i32,
    pub base_speed: i32,

    // Effective stats used in combat.
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,

    pub skill_points: u32,

    pub return_location: ReturnLocation,
}

impl PlayerProgressState {
    /// Apply incoming damage after defense mitigation, clamping at zero.
    ///
    /// Returns the realized damage for logging.
    pub fn apply_damage(&mut self, incoming: u32) -> u32 {
        let defense = self.defense.max(0) as u32;
        let actual = mitigate_damage(incoming, defense);
        self.health.current = self.health.current.saturating_sub(actual);
        actual
    }

    /// Restore health, clamped to the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.health.current = (self.health.current + amount).min(self.health.maximum);
    }

    pub fn grant_experience(&mut self, amount: u32) {
        self.experience += amount;
    }

    pub fn is_defeated(&self) -> bool {
        self.health.current == 0
    }
}

impl Default for PlayerProgressState {
    fn default() -> Self {
        Self {
            name: "Hero".into(),
            level: 1,
            experience: 0,
            health: ResourceMeter::full(100),
            mana: ResourceMeter::full(30),
            base_attack: 10,
            base_defense: 5,
            base_speed: 8,
            attack: 10,
            defense: 5,
            speed: 8,
            skill_points: 0,
            return_location: ReturnLocation::default(),
        }
    }
}

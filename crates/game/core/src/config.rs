/// Combat rule constants and tunable balance parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Lower bound of the player damage multiplier, in percent.
    pub variance_min: u32,
    /// Upper bound of the player damage multiplier, in percent (inclusive).
    pub variance_max: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum loot-table entries per combatant template.
    pub const MAX_LOOT_ENTRIES: usize = 8;

    // ===== runtime-tunable defaults =====
    /// Default ±10% player damage variance.
    pub const DEFAULT_VARIANCE_MIN: u32 = 90;
    pub const DEFAULT_VARIANCE_MAX: u32 = 110;

    pub fn new() -> Self {
        Self {
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Damage calculation.

/// Reduce incoming damage by the defender's defense.
///
/// # Formula
///
/// ```text
/// actual = max(1, incoming - defense / 2)
/// ```
///
/// Half the defense stat (integer division) is subtracted, and at least 1
/// point always lands so no pairing of stats can stall a battle forever.
pub fn mitigate_damage(incoming: u32, defense: u32) -> u32 {
    incoming.saturating_sub(defense / 2).max(1)
}

/// Compute a player attack's raw damage with variance applied.
///
/// `multiplier_percent` is drawn uniformly from the configured variance
/// range (90-110 by default, i.e. ±10%) by the caller. The result is
/// `attack × multiplier / 100`, rounded half-up, before any mitigation.
pub fn player_attack_damage(attack: u32, multiplier_percent: u32) -> u32 {
    (attack * multiplier_percent + 50) / 100
}

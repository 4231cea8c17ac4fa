//! RNG oracle for deterministic random number generation.
//!
//! Combat draws randomness for enemy action choice, player damage variance,
//! loot rolls, and encounter checks. All of it goes through a trait so the
//! same battle can be replayed from a seed in tests and in the runtime.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed they must
//! produce the same value. Sessions derive a fresh seed per draw from a base
//! seed, an action nonce, the acting combatant, and a per-roll context.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a percentage die in [0, 100).
    ///
    /// Chance-based mechanics (special attacks, drops, encounter checks)
    /// compare this against a 0-100 chance value with strict less-than.
    fn roll_percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
/// - **Good quality**: Passes statistical tests (PractRand, TestU01)
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    ///
    /// Uses the LCG formula `state' = (state × multiplier + increment) mod 2^64`.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed from battle state components.
///
/// Combines multiple entropy sources to ensure unique seeds for each random
/// event in an encounter.
///
/// # Arguments
///
/// * `base_seed` - Seed fixed when the session or tracker is created
/// * `nonce` - Action sequence number (increments each resolved action)
/// * `actor_id` - Combatant the draw belongs to
/// * `context` - Distinguishes multiple rolls inside one action
///
/// # Context Values
///
/// Use different context values when one action needs several independent
/// rolls:
///
/// - `0`: Primary roll (damage variance, action choice)
/// - `1`: Secondary roll (drop check)
/// - `2`: Tertiary roll (drop quantity)
/// - etc.
pub fn compute_seed(base_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // Mix all inputs using simple hash combiners
    // These constants are based on SplitMix64 and FxHash multipliers
    let mut hash = base_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

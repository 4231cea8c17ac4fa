//! Random encounter triggering during overworld movement.
//!
//! The tracker counts discrete steps (the runtime translates movement
//! distance into steps) and decides when a battle starts. Between
//! `min_steps` and `max_steps` after the previous battle, each check rolls
//! against `encounter_chance`; at `max_steps` an encounter is forced, so no
//! stretch of walking goes unanswered forever.

use crate::combatant::CombatantTemplate;
use crate::env::{ItemOracle, RngOracle, compute_seed};
use crate::loot::{SelectionError, select_weighted};

/// Seed actor id for draws that belong to no combatant.
const SYSTEM_ACTOR: u32 = u32::MAX;

/// Encounter check roll.
const CTX_CHECK: u32 = 0;
/// Redraw of the next-check threshold after a failed check.
const CTX_REDRAW: u32 = 1;
/// Weighted enemy selection on trigger.
const CTX_SELECT: u32 = 2;

/// Errors raised when an encounter cannot be started.
///
/// Both variants are fatal for the trigger: the battle must not start
/// against undefined enemy data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("invalid encounter configuration: {0}")]
    InvalidConfiguration(#[from] SelectionError),

    #[error("enemy '{enemy}' references unknown loot item '{item}'")]
    UnknownLootItem { enemy: String, item: String },
}

/// Tunable thresholds for the encounter trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterConfig {
    /// Minimum steps before a battle can occur.
    pub min_steps: u32,
    /// Maximum steps before a battle is forced.
    pub max_steps: u32,
    /// Chance of an encounter per check after the minimum (0-100).
    pub encounter_chance: u32,
}

impl EncounterConfig {
    pub const DEFAULT_MIN_STEPS: u32 = 5;
    pub const DEFAULT_MAX_STEPS: u32 = 15;
    pub const DEFAULT_ENCOUNTER_CHANCE: u32 = 10;
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            min_steps: Self::DEFAULT_MIN_STEPS,
            max_steps: Self::DEFAULT_MAX_STEPS,
            encounter_chance: Self::DEFAULT_ENCOUNTER_CHANCE,
        }
    }
}

/// Step counter deciding when a random battle starts.
///
/// Owned by the overworld driver. After every battle ends, terminal
/// handling must call [`EncounterTracker::reset`] before movement tracking
/// resumes; the counter is not reset implicitly.
#[derive(Clone, Debug)]
pub struct EncounterTracker {
    config: EncounterConfig,
    steps_since_last_battle: u32,
    steps_until_next_check: u32,
    seed: u64,
    nonce: u64,
}

impl EncounterTracker {
    pub fn new(config: EncounterConfig, seed: u64, rng: &(impl RngOracle + ?Sized)) -> Self {
        let mut tracker = Self {
            config,
            steps_since_last_battle: 0,
            steps_until_next_check: 0,
            seed,
            nonce: 0,
        };
        tracker.steps_until_next_check = tracker.draw_check_threshold(rng);
        tracker
    }

    /// Register one step of movement. Returns true when a battle triggers.
    pub fn record_step(&mut self, rng: &(impl RngOracle + ?Sized)) -> bool {
        self.steps_since_last_battle += 1;

        if self.steps_since_last_battle >= self.steps_until_next_check {
            self.check_for_encounter(rng)
        } else {
            false
        }
    }

    /// Roll the encounter check.
    ///
    /// Below `min_steps` nothing happens. Otherwise a uniform [0, 100) draw
    /// below `encounter_chance` triggers; reaching `max_steps` triggers
    /// unconditionally. A failed check pushes the next check 2-4 steps out.
    fn check_for_encounter(&mut self, rng: &(impl RngOracle + ?Sized)) -> bool {
        if self.steps_since_last_battle < self.config.min_steps {
            return false;
        }

        let roll = rng.roll_percent(self.roll_seed(CTX_CHECK));
        let triggered = roll < self.config.encounter_chance
            || self.steps_since_last_battle >= self.config.max_steps;

        if !triggered {
            self.steps_until_next_check =
                self.steps_since_last_battle + rng.range(self.roll_seed(CTX_REDRAW), 2, 4);
        }
        self.nonce += 1;

        triggered
    }

    /// Select the enemy for a triggered encounter.
    ///
    /// Uses weighted selection over the pool and validates that every loot
    /// reference on the chosen template resolves, so a victory later cannot
    /// stumble over broken authored data.
    ///
    /// # Errors
    ///
    /// [`EncounterError::InvalidConfiguration`] for an unusable pool,
    /// [`EncounterError::UnknownLootItem`] for a dangling loot reference.
    /// Either way the trigger must abort instead of starting the battle.
    pub fn select_enemy<'a>(
        &mut self,
        pool: &'a [CombatantTemplate],
        items: &(impl ItemOracle + ?Sized),
        rng: &(impl RngOracle + ?Sized),
    ) -> Result<&'a CombatantTemplate, EncounterError> {
        let seed = self.roll_seed(CTX_SELECT);
        self.nonce += 1;

        let template = select_weighted(pool, rng, seed)?;

        for entry in &template.loot {
            if let Some(item) = &entry.item
                && items.definition(item).is_none()
            {
                return Err(EncounterError::UnknownLootItem {
                    enemy: template.name.clone(),
                    item: item.clone(),
                });
            }
        }

        Ok(template)
    }

    /// Reset the counter after a battle ended, whatever the outcome.
    pub fn reset(&mut self, rng: &(impl RngOracle + ?Sized)) {
        self.steps_since_last_battle = 0;
        self.nonce += 1;
        self.steps_until_next_check = self.draw_check_threshold(rng);
    }

    /// Uniform draw in [min_steps, max_steps).
    fn draw_check_threshold(&mut self, rng: &(impl RngOracle + ?Sized)) -> u32 {
        let seed = self.roll_seed(CTX_REDRAW);
        self.nonce += 1;
        rng.range(
            seed,
            self.config.min_steps,
            self.config.max_steps.saturating_sub(1),
        )
    }

    fn roll_seed(&self, context: u32) -> u64 {
        compute_seed(self.seed, self.nonce, SYSTEM_ACTOR, context)
    }

    pub fn steps_since_last_battle(&self) -> u32 {
        self.steps_since_last_battle
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }
}

//! Overworld movement tracking for the encounter trigger.
//!
//! Translates continuous movement into the discrete steps the core tracker
//! counts. One step is registered each time the player has moved at least
//! `step_distance` world units from the last counted position.

use battle_core::{EncounterConfig, EncounterTracker, PcgRng, WorldPosition};

pub(crate) struct OverworldDriver {
    tracker: EncounterTracker,
    rng: PcgRng,
    last_position: WorldPosition,
    step_distance: f32,
}

impl OverworldDriver {
    pub(crate) fn new(
        config: EncounterConfig,
        seed: u64,
        step_distance: f32,
        origin: WorldPosition,
    ) -> Self {
        let rng = PcgRng;
        Self {
            tracker: EncounterTracker::new(config, seed, &rng),
            rng,
            last_position: origin,
            step_distance,
        }
    }

    /// Track a movement update. Returns true when a battle triggers.
    pub(crate) fn track_movement(&mut self, position: WorldPosition) -> bool {
        let dx = position.x - self.last_position.x;
        let dy = position.y - self.last_position.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < self.step_distance {
            return false;
        }

        self.last_position = position;
        self.tracker.record_step(&self.rng)
    }

    /// Reset the step counter. Must run on every battle terminal.
    pub(crate) fn reset(&mut self) {
        self.tracker.reset(&self.rng);
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut EncounterTracker {
        &mut self.tracker
    }

    pub(crate) fn steps(&self) -> u32 {
        self.tracker.steps_since_last_battle()
    }

    pub(crate) fn rng(&self) -> &PcgRng {
        &self.rng
    }
}

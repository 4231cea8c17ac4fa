//! Collaborator interfaces the runtime notifies as a battle unfolds.
//!
//! All methods default to no-ops, so a missing collaborator degrades
//! gracefully: core logic proceeds on internal state and the notification
//! is simply skipped. Implementations must not call back into the runtime.

use battle_core::{ResourceMeter, TerminalSignal, VictoryRewards};

/// Presentation-side callbacks: log lines and UI refresh notifications.
///
/// Mirrors what a battle screen needs to stay current. Calls arrive in
/// resolution order on the driver's task.
pub trait PresentationSink: Send + Sync {
    /// A battle was initialized with the two display names.
    fn battle_started(&self, _player_name: &str, _enemy_name: &str) {}

    /// Ordered battle log line.
    fn log_line(&self, _line: &str) {}

    /// Player health or mana changed.
    fn player_vitals(&self, _health: ResourceMeter, _mana: ResourceMeter) {}

    /// Enemy health changed.
    fn enemy_health(&self, _health: ResourceMeter) {}

    /// Action buttons should be enabled or disabled.
    fn input_enabled(&self, _enabled: bool) {}
}

/// Progression-side callback: receives the victory payload.
pub trait ProgressionSink: Send + Sync {
    fn grant_rewards(&self, _rewards: &VictoryRewards) {}
}

/// Overworld-side callback: receives the terminal signal with its
/// destination context. Navigation is this collaborator's job.
pub trait OverworldSink: Send + Sync {
    fn battle_ended(&self, _signal: &TerminalSignal) {}
}

/// No-op presentation sink used when none is configured.
pub struct NullPresentation;

impl PresentationSink for NullPresentation {}

/// No-op progression sink used when none is configured.
pub struct NullProgression;

impl ProgressionSink for NullProgression {}

/// No-op overworld sink used when none is configured.
pub struct NullOverworld;

impl OverworldSink for NullOverworld {}

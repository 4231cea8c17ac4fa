//! Types downstream clients interact with.

mod collaborators;
mod errors;
mod providers;

pub use collaborators::{
    NullOverworld, NullPresentation, NullProgression, OverworldSink, PresentationSink,
    ProgressionSink,
};
pub use errors::{Result, RuntimeError};
pub use providers::{AttackProvider, PlayerActionProvider, PlayerCommand, ScriptedProvider};

//! Runtime orchestration for the turn-based combat engine.
//!
//! This crate wires the pure rules in `battle-core` and the content loaders
//! in `battle-content` into a driveable game runtime. Consumers embed
//! [`Runtime`] to feed overworld movement, issue player commands, subscribe
//! to events, and receive terminal signals.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for flexible event routing
//! - [`handoff`] carries the serialized overworld/battle boundary snapshot
//! - [`oracle`] adapts loaded content into the oracles the rules consume
//! - [`presentation`] keeps presentation-side helpers such as the battle log

pub mod api;
pub mod events;
pub mod handoff;
pub mod oracle;
pub mod presentation;
pub mod runtime;

mod battle;
mod overworld;

pub use api::{
    AttackProvider, NullOverworld, NullPresentation, NullProgression, OverworldSink,
    PlayerActionProvider, PlayerCommand, PresentationSink, ProgressionSink, Result, RuntimeError,
    ScriptedProvider,
};
pub use events::{EncounterEvent, Event, EventBus, Topic};
pub use handoff::EncounterHandoff;
pub use oracle::ItemOracleImpl;
pub use presentation::BattleLog;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

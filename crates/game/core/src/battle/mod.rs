//! Battle state machine.
//!
//! [`BattleSession`] owns one encounter: it sequences turns, applies damage
//! results, and detects termination. Every mutation entry point is guarded
//! by the current state, so actions arriving at the wrong moment (double
//! clicks, stale UI callbacks) resolve to an observable no-op instead of
//! corrupting the turn order.

mod event;
mod session;
mod state;

pub use event::{BattleEvent, TerminalSignal, VictoryRewards};
pub use session::{ActionOutcome, BattleSession, PendingResolution};
pub use state::BattleState;

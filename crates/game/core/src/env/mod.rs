//! Traits describing read-only data the combat rules consume.
//!
//! Oracles expose item definitions and random draws. Implementations live in
//! the runtime; the rules crate only depends on the traits so headless tests
//! can substitute fixtures.
mod items;
mod rng;

pub use items::{ItemDefinition, ItemKind, ItemOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};

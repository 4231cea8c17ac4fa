//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Enemy catalogs (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//! - Game tuning (encounter thresholds, battle pacing; data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in battle state.
//!
//! All loaders use battle-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, GameTuning, ItemLoader, OverworldTuning,
    PacingTuning,
};

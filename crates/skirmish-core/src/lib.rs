//! Core types and definitions for the SKIRMISH simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! unit specs and views, movement intents, geometry primitives, obstacle
//! shapes, the read-only query seam used by decision strategies, the clock
//! and input abstractions, constants, and the error type.
//! It owns no simulation state.

pub mod clock;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod input;
pub mod obstacle;
pub mod query;
pub mod state;
pub mod types;

pub use error::SkirmishError;
pub use state::{BattleOutcome, WorldSnapshot};
pub use glam::DVec2;

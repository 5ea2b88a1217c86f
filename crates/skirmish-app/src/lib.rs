//! SKIRMISH headless host.
//!
//! Runs a stage in a frame-loop thread, forwards pointer input to the
//! order tool, and publishes the latest snapshot for polling.

pub mod game_loop;
pub mod state;

pub use skirmish_core as core;

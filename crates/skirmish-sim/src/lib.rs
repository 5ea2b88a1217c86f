//! Simulation for SKIRMISH.
//!
//! Owns the unit roster and obstacles, runs the per-unit systems once per
//! frame with a variable delta, drives selection and route orders from
//! pointer input, and produces `WorldSnapshot`s for renderers.

pub mod orders;
pub mod roster;
pub mod stage;
pub mod systems;
pub mod unit;
pub mod visual;
pub mod world;

pub use skirmish_core as core;
pub use orders::{OrderMode, OrderTool};
pub use stage::{StageConfig, STAGE_COUNT};
pub use unit::Unit;
pub use visual::VisualController;
pub use world::{SimConfig, World};

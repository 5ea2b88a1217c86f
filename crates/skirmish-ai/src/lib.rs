//! Decision strategies for SKIRMISH units.
//!
//! Each strategy is an explicit state struct plus a pure `decide` step that
//! reads the world only through `UnitQuery` and returns a `MoveIntent`.
//! No dependency on the world type — operates on plain data.

pub mod chase;
pub mod decision;
pub mod player;
mod timer;

pub use decision::{Decision, DecisionKind};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;

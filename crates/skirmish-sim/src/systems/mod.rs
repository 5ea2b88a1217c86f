//! Per-unit phases of the world tick.
//!
//! Each system is a plain function over the world's parts (roster,
//! obstacles, rng). They run for one unit at a time, in the order
//! intent, movement, combat; cleanup runs for units observed dead.

pub mod cleanup;
pub mod combat;
pub mod intent;
pub mod movement;
pub mod snapshot;

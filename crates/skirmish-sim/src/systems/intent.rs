//! Converts a strategy's move intent into heading and speed.

use std::f64::consts::PI;

use rand::Rng;

use skirmish_core::constants::{RANDOM_WALK_SPEED_FACTOR, RANDOM_WALK_TURN_FACTOR};
use skirmish_core::geometry::angle_between;
use skirmish_core::types::MoveIntent;

use crate::unit::Unit;

/// Resolve `intent` for `unit`. The resulting speed always lies in `[0, max_speed]`.
pub fn apply_move_intent<R: Rng + ?Sized>(unit: &mut Unit, intent: MoveIntent, rng: &mut R) {
    let max_speed = unit.spec().max_speed;
    let cap = |speed: f64| speed.min(max_speed).max(0.0);

    match intent {
        MoveIntent::MoveTo { point, speed } => {
            unit.speed = cap(speed.unwrap_or(max_speed));
            unit.heading = angle_between(unit.position, point);
        }
        MoveIntent::MoveVel { vel } => {
            unit.speed = cap(vel.length());
            unit.heading = vel.y.atan2(vel.x);
        }
        MoveIntent::Idle => {
            unit.speed = 0.0;
        }
        MoveIntent::RandomWalk { speed } => {
            unit.speed = cap(speed.unwrap_or(max_speed * RANDOM_WALK_SPEED_FACTOR));
            // Relative turn, so drift accumulates tick over tick.
            unit.heading += rng.gen_range(-PI..PI) * RANDOM_WALK_TURN_FACTOR;
        }
        MoveIntent::SameAsBefore => {}
    }
}

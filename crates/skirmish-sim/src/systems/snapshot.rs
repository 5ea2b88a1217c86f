//! Snapshot system: reads the world parts and builds a `WorldSnapshot`.
//!
//! Read-only; never modifies the world.

use skirmish_core::obstacle::Obstacle;
use skirmish_core::state::{BattleOutcome, UnitSnapshot, WorldSnapshot};

use crate::roster::Roster;
use crate::unit::Unit;

pub fn build_snapshot(
    roster: &Roster,
    obstacles: &[Obstacle],
    tick: u64,
    elapsed_secs: f64,
    outcome: BattleOutcome,
) -> WorldSnapshot {
    WorldSnapshot {
        tick,
        elapsed_secs,
        units: roster.iter().map(build_unit).collect(),
        obstacles: obstacles.to_vec(),
        outcome,
    }
}

fn build_unit(unit: &Unit) -> UnitSnapshot {
    let view = unit.view();
    UnitSnapshot {
        hp_ratio: view.hp_ratio(),
        view,
        target: unit.target(),
        player_controlled: unit.is_player_controlled(),
        route_active: unit.route_active(),
    }
}

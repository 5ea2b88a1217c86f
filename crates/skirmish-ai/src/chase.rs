//! Enemy strategy: periodically lock onto the nearest opponent and run at it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::constants::CHASE_RESCAN_INTERVAL;
use skirmish_core::query::UnitQuery;
use skirmish_core::types::{MoveIntent, UnitId, UnitView};

use crate::timer::countdown;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChaseDecision {
    rescan_timer: f64,
    target: Option<UnitId>,
}

impl ChaseDecision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the rescan phase once, at bind time.
    pub fn bind<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rescan_timer = rng.gen_range(0.0..CHASE_RESCAN_INTERVAL);
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn rescan_timer(&self) -> f64 {
        self.rescan_timer
    }

    /// Rescan is unbounded in range: every living opponent is a candidate.
    pub fn decide<Q: UnitQuery + ?Sized>(
        &mut self,
        owner: &UnitView,
        world: &Q,
        dt: f64,
    ) -> MoveIntent {
        if countdown(&mut self.rescan_timer, dt, CHASE_RESCAN_INTERVAL) {
            self.target = world
                .alive_nearest_unit(
                    owner.position,
                    f64::INFINITY,
                    Some(owner.faction.opponent()),
                )
                .map(|unit| unit.id);
        }

        match self.target.and_then(|id| world.alive_unit(id)) {
            Some(unit) => MoveIntent::move_to(unit.position),
            None => {
                self.target = None;
                MoveIntent::random_walk()
            }
        }
    }
}

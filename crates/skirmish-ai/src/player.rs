//! Player-directed strategy: follow an issued route, divert to nearby enemies.
//!
//! The route is stored as consecutive displacement vectors, so it replays
//! relative to wherever the unit is when it starts moving. Progress is an
//! odometer (segment index plus distance traveled on that segment) driven
//! by max speed, not by measured position.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::constants::PLAYER_SEARCH_INTERVAL;
use skirmish_core::query::UnitQuery;
use skirmish_core::types::{MoveIntent, UnitId, UnitSpec, UnitView};

use crate::timer::countdown;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerDecision {
    /// Displacement of each route segment.
    waypoints: Vec<DVec2>,
    segment_index: usize,
    traveled_on_segment: f64,
    search_timer: f64,
    target: Option<UnitId>,
}

impl PlayerDecision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the search-timer phase so many units do not search on the same tick.
    pub fn bind<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.search_timer = rng.gen_range(0.0..PLAYER_SEARCH_INTERVAL);
    }

    /// Replace the route with the path through `points`. Empty input is ignored.
    pub fn set_route(&mut self, points: &[DVec2]) {
        if points.is_empty() {
            return;
        }
        self.waypoints = points.windows(2).map(|w| w[1] - w[0]).collect();
        self.segment_index = 0;
        self.traveled_on_segment = 0.0;
    }

    pub fn route_complete(&self) -> bool {
        self.segment_index >= self.waypoints.len()
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn traveled_on_segment(&self) -> f64 {
        self.traveled_on_segment
    }

    pub fn search_timer(&self) -> f64 {
        self.search_timer
    }

    /// Advance the odometer and search timer by `dt`, then pick an intent.
    ///
    /// The odometer keeps running while chasing, so a chase consumes route
    /// progress.
    pub fn decide<Q: UnitQuery + ?Sized>(
        &mut self,
        owner: &UnitView,
        spec: &UnitSpec,
        world: &Q,
        dt: f64,
    ) -> MoveIntent {
        self.advance_route(spec.max_speed * dt);

        if countdown(&mut self.search_timer, dt, PLAYER_SEARCH_INTERVAL) {
            self.target = world
                .alive_nearest_unit(
                    owner.position,
                    spec.detect_range,
                    Some(owner.faction.opponent()),
                )
                .map(|enemy| enemy.id);
        }

        match self.target.and_then(|id| world.alive_unit(id)) {
            Some(enemy) => return MoveIntent::move_to(enemy.position),
            None => self.target = None,
        }

        match self.waypoints.get(self.segment_index) {
            Some(segment) => MoveIntent::MoveVel {
                vel: segment.normalize_or_zero() * spec.max_speed,
            },
            None => MoveIntent::random_walk(),
        }
    }

    fn advance_route(&mut self, distance: f64) {
        self.traveled_on_segment += distance;
        while let Some(segment) = self.waypoints.get(self.segment_index) {
            let length = segment.length();
            if self.traveled_on_segment < length {
                break;
            }
            self.traveled_on_segment -= length;
            self.segment_index += 1;
        }
    }
}

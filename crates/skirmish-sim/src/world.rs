//! The world: tick authority over every unit and obstacle.
//!
//! `World` owns the unit roster, the obstacle list, the seeded RNG and the
//! clock. Each `update` walks the units in id order: a living unit gets
//! its decision, movement and combat phases; a unit already dead is
//! removed. A unit killed during a tick is therefore pruned either later
//! in the same walk or at the start of the next one.
//!
//! Strategies only read other units through `UnitQuery`. Damage, push-out
//! and removal are written by the world alone.

use std::sync::Arc;
use std::time::Duration;

use glam::DVec2;
use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_ai::Decision;
use skirmish_core::clock::Clock;
use skirmish_core::constants::PUSH_COEFFICIENT;
use skirmish_core::obstacle::Obstacle;
use skirmish_core::query::UnitQuery;
use skirmish_core::state::{BattleOutcome, WorldSnapshot};
use skirmish_core::types::{Faction, MoveIntent, UnitId, UnitSpec, UnitView};
use skirmish_core::SkirmishError;

use crate::roster::Roster;
use crate::systems;
use crate::unit::Unit;
use crate::visual::VisualController;

/// Configuration for a new world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed. Same seed and same frame deltas give the same battle.
    pub seed: u64,
    /// Distance a unit is displaced per tick while overlapping something.
    pub push_coefficient: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            push_coefficient: PUSH_COEFFICIENT,
        }
    }
}

pub struct World {
    roster: Roster,
    obstacles: Vec<Obstacle>,
    next_id: u64,
    rng: ChaCha8Rng,
    clock: Box<dyn Clock>,
    /// Clock reading at construction.
    baseline: f64,
    push_coefficient: f64,
    tick: u64,
}

impl World {
    pub fn new(config: SimConfig, clock: Box<dyn Clock>) -> Self {
        let baseline = clock.now_secs();
        Self {
            roster: Roster::new(),
            obstacles: Vec::new(),
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            clock,
            baseline,
            push_coefficient: config.push_coefficient,
            tick: 0,
        }
    }

    // ---- Tick ----

    /// Advance the simulation by one frame of `delta` wall time.
    pub fn update(&mut self, delta: Duration) {
        let dt = delta.as_secs_f64();

        for id in self.roster.ids() {
            let Some(alive) = self.roster.get(id).map(Unit::is_alive) else {
                continue;
            };
            if alive {
                self.update_unit(id, dt);
            } else {
                self.remove_unit(id);
            }
        }

        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }

        self.tick += 1;
        trace!(
            "tick {} dt={:.4}s units={} outcome={:?}",
            self.tick,
            dt,
            self.roster.len(),
            self.outcome()
        );
    }

    fn update_unit(&mut self, id: UnitId, dt: f64) {
        let Some(unit) = self.roster.get_mut(id) else {
            return;
        };
        unit.attack_timer -= dt;

        // The strategy is taken out while it reads the roster, then put back.
        let mut decision = unit.decision.take();
        let owner = unit.view();
        let spec = unit.shared_spec();
        let intent = match decision.as_mut() {
            Some(decision) => decision.decide(&owner, &spec, &self.roster, dt),
            None => MoveIntent::Idle,
        };

        if let Some(unit) = self.roster.get_mut(id) {
            unit.decision = decision;
            systems::intent::apply_move_intent(unit, intent, &mut self.rng);
        }

        systems::movement::run(
            &mut self.roster,
            &self.obstacles,
            id,
            dt,
            self.push_coefficient,
        );

        if let Some(strike) = systems::combat::run(&mut self.roster, id) {
            if strike.killed {
                debug!("Unit {} killed unit {}", id, strike.target);
            }
        }

        if let Some(unit) = self.roster.get_mut(id) {
            unit.update_visual();
        }
    }

    // ---- Units ----

    /// Create a unit at full health. The decision, if any, is bound immediately.
    pub fn add_unit(
        &mut self,
        spec: impl Into<Arc<UnitSpec>>,
        position: DVec2,
        heading: f64,
        decision: Option<Decision>,
    ) -> Result<UnitId, SkirmishError> {
        let spec = spec.into();
        spec.validate()?;

        self.next_id += 1;
        let id = UnitId(self.next_id);
        let mut unit = Unit::new(id, spec, position, heading);
        if let Some(mut decision) = decision {
            decision.bind(&mut self.rng);
            unit.decision = Some(decision);
        }
        debug!(
            "Added {:?} unit {} at ({:.1}, {:.1})",
            unit.spec().faction,
            id,
            position.x,
            position.y
        );
        self.roster.insert(unit);
        Ok(id)
    }

    /// Remove a unit, running its visual's destroy hook. Returns whether it existed.
    pub fn remove_unit(&mut self, id: UnitId) -> bool {
        match systems::cleanup::remove(&mut self.roster, id) {
            Some(unit) => {
                debug!(
                    "Removed unit {} (alive={}, hp={:.1})",
                    id,
                    unit.is_alive(),
                    unit.hp()
                );
                true
            }
            None => false,
        }
    }

    /// Replace a unit's decision strategy. The new one draws its random phases now.
    pub fn bind_decision(&mut self, id: UnitId, mut decision: Decision) -> Result<(), SkirmishError> {
        let unit = self
            .roster
            .get_mut(id)
            .ok_or(SkirmishError::UnknownUnit(id))?;
        decision.bind(&mut self.rng);
        unit.decision = Some(decision);
        Ok(())
    }

    /// Replace a unit's visual. The old one is destroyed, the new one bound.
    pub fn bind_visual(
        &mut self,
        id: UnitId,
        mut visual: Box<dyn VisualController>,
    ) -> Result<(), SkirmishError> {
        let unit = self
            .roster
            .get_mut(id)
            .ok_or(SkirmishError::UnknownUnit(id))?;
        unit.destroy_visual();
        visual.bind(&unit.view());
        unit.visual = Some(visual);
        Ok(())
    }

    /// Hand a route to a unit's strategy. The route replays relative to the
    /// unit's position; an empty route is ignored.
    pub fn set_route(&mut self, id: UnitId, points: &[DVec2]) -> Result<(), SkirmishError> {
        let unit = self
            .roster
            .get_mut(id)
            .ok_or(SkirmishError::UnknownUnit(id))?;
        let accepted = unit
            .decision
            .as_mut()
            .is_some_and(|decision| decision.set_route(points));
        if !accepted {
            return Err(SkirmishError::RouteUnsupported(id));
        }
        debug!("Unit {} given a {}-point route", id, points.len());
        Ok(())
    }

    /// Tell each unit's visual whether it is in `selected`.
    pub fn mark_selected(&mut self, selected: &[UnitId]) {
        for id in self.roster.ids() {
            if let Some(visual) = self
                .roster
                .get_mut(id)
                .and_then(|unit| unit.visual.as_mut())
            {
                visual.set_selected(selected.contains(&id));
            }
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    /// Units in id order, including dead ones not yet pruned.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.roster.iter()
    }

    pub fn unit_count(&self) -> usize {
        self.roster.len()
    }

    // ---- Obstacles ----

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Remove the obstacle at `index`, keeping the order of the rest.
    pub fn remove_obstacle(&mut self, index: usize) -> Option<Obstacle> {
        (index < self.obstacles.len()).then(|| self.obstacles.remove(index))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    // ---- Queries ----

    /// Every living unit within `range` of `point`, boundary inclusive.
    pub fn query_alive_units_in_range(&self, point: DVec2, range: f64) -> Vec<UnitView> {
        self.roster.alive_units_in_range(point, range)
    }

    /// Nearest living unit within `range`, optionally of one faction.
    /// Equal distances go to the lower id.
    pub fn query_alive_nearest_unit(
        &self,
        point: DVec2,
        range: f64,
        faction: Option<Faction>,
    ) -> Option<UnitView> {
        self.roster.alive_nearest_unit(point, range, faction)
    }

    pub fn enemy_units_all_dead(&self) -> bool {
        !self.roster.any_alive(Faction::Enemy)
    }

    pub fn ally_units_all_dead(&self) -> bool {
        !self.roster.any_alive(Faction::Player)
    }

    /// Defeat is checked first, so mutual annihilation is a defeat.
    pub fn outcome(&self) -> BattleOutcome {
        if self.ally_units_all_dead() {
            BattleOutcome::Defeat
        } else if self.enemy_units_all_dead() {
            BattleOutcome::Victory
        } else {
            BattleOutcome::Ongoing
        }
    }

    /// Seconds of clock time since the world was created.
    pub fn elapsed_time(&self) -> f64 {
        self.clock.now_secs() - self.baseline
    }

    /// Number of completed `update` calls.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(
            &self.roster,
            &self.obstacles,
            self.tick,
            self.elapsed_time(),
            self.outcome(),
        )
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl UnitQuery for World {
    fn unit(&self, id: UnitId) -> Option<UnitView> {
        self.roster.unit(id)
    }

    fn alive_units_in_range(&self, point: DVec2, range: f64) -> Vec<UnitView> {
        self.roster.alive_units_in_range(point, range)
    }

    fn alive_nearest_unit(
        &self,
        point: DVec2,
        range: f64,
        faction: Option<Faction>,
    ) -> Option<UnitView> {
        self.roster.alive_nearest_unit(point, range, faction)
    }
}

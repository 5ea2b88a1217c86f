//! Unit entity owned by the world.

use std::fmt;
use std::sync::Arc;

use glam::DVec2;

use skirmish_ai::Decision;
use skirmish_core::types::{UnitId, UnitSpec, UnitView};

use crate::visual::VisualController;

pub struct Unit {
    id: UnitId,
    spec: Arc<UnitSpec>,
    pub(crate) position: DVec2,
    pub(crate) heading: f64,
    pub(crate) speed: f64,
    hp: f64,
    alive: bool,
    /// Seconds until the next attack is allowed. Negative means overdue.
    pub(crate) attack_timer: f64,
    pub(crate) decision: Option<Decision>,
    pub(crate) visual: Option<Box<dyn VisualController>>,
}

impl Unit {
    /// Full health, stationary, ready to attack. No strategies bound.
    pub fn new(id: UnitId, spec: Arc<UnitSpec>, position: DVec2, heading: f64) -> Self {
        let hp = spec.max_hp;
        Self {
            id,
            spec,
            position,
            heading,
            speed: 0.0,
            hp,
            alive: hp > 0.0,
            attack_timer: 0.0,
            decision: None,
            visual: None,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn spec(&self) -> &UnitSpec {
        &self.spec
    }

    pub fn shared_spec(&self) -> Arc<UnitSpec> {
        Arc::clone(&self.spec)
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn attack_timer(&self) -> f64 {
        self.attack_timer
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn target(&self) -> Option<UnitId> {
        self.decision.as_ref().and_then(Decision::target)
    }

    pub fn is_player_controlled(&self) -> bool {
        self.decision
            .as_ref()
            .is_some_and(Decision::is_player_controlled)
    }

    pub fn route_active(&self) -> bool {
        self.decision.as_ref().is_some_and(Decision::route_active)
    }

    /// Subtract `amount` from hp, flooring at zero.
    /// Returns true if this blow killed the unit. Damage to a dead unit is ignored.
    pub fn apply_damage(&mut self, amount: f64) -> bool {
        if !self.alive {
            return false;
        }
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        if self.hp == 0.0 {
            self.alive = false;
        }
        !self.alive
    }

    pub fn view(&self) -> UnitView {
        UnitView {
            id: self.id,
            faction: self.spec.faction,
            position: self.position,
            heading: self.heading,
            speed: self.speed,
            hp: self.hp,
            max_hp: self.spec.max_hp,
            alive: self.alive,
        }
    }

    pub(crate) fn update_visual(&mut self) {
        let view = self.view();
        if let Some(visual) = self.visual.as_mut() {
            visual.update(&view);
        }
    }

    /// Detach the visual, running its destroy hook.
    pub(crate) fn destroy_visual(&mut self) {
        if let Some(mut visual) = self.visual.take() {
            visual.destroy();
        }
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.id)
            .field("faction", &self.spec.faction)
            .field("position", &self.position)
            .field("heading", &self.heading)
            .field("speed", &self.speed)
            .field("hp", &self.hp)
            .field("alive", &self.alive)
            .field("attack_timer", &self.attack_timer)
            .field("decision", &self.decision)
            .finish_non_exhaustive()
    }
}

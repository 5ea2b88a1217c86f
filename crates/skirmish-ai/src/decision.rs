//! Closed set of decision strategies a unit can carry.
//!
//! Callers that need to know something about a strategy ask through an
//! explicit capability (`target`, `is_player_controlled`, `route_active`)
//! rather than matching on the concrete variant.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::query::UnitQuery;
use skirmish_core::types::{MoveIntent, UnitId, UnitSpec, UnitView};

use crate::chase::ChaseDecision;
use crate::player::PlayerDecision;

/// Strategy selector used by stage configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    Player,
    Chase,
}

impl DecisionKind {
    /// Fresh, unbound strategy of this kind.
    pub fn build(self) -> Decision {
        match self {
            DecisionKind::Player => Decision::Player(PlayerDecision::new()),
            DecisionKind::Chase => Decision::Chase(ChaseDecision::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    Player(PlayerDecision),
    Chase(ChaseDecision),
}

impl Decision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::Player(_) => DecisionKind::Player,
            Decision::Chase(_) => DecisionKind::Chase,
        }
    }

    /// Draw bind-time random phases. Called once when attached to a unit.
    pub fn bind<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Decision::Player(player) => player.bind(rng),
            Decision::Chase(chase) => chase.bind(rng),
        }
    }

    pub fn decide<Q: UnitQuery + ?Sized>(
        &mut self,
        owner: &UnitView,
        spec: &UnitSpec,
        world: &Q,
        dt: f64,
    ) -> MoveIntent {
        match self {
            Decision::Player(player) => player.decide(owner, spec, world, dt),
            Decision::Chase(chase) => chase.decide(owner, world, dt),
        }
    }

    /// Unit currently remembered as the target, if any.
    pub fn target(&self) -> Option<UnitId> {
        match self {
            Decision::Player(player) => player.target(),
            Decision::Chase(chase) => chase.target(),
        }
    }

    /// Whether the unit takes orders from the player's selection tools.
    pub fn is_player_controlled(&self) -> bool {
        matches!(self, Decision::Player(_))
    }

    /// Whether an issued route is still being followed.
    pub fn route_active(&self) -> bool {
        match self {
            Decision::Player(player) => !player.route_complete(),
            Decision::Chase(_) => false,
        }
    }

    /// Push a route. Returns false if this strategy does not take routes.
    pub fn set_route(&mut self, points: &[DVec2]) -> bool {
        match self {
            Decision::Player(player) => {
                player.set_route(points);
                true
            }
            Decision::Chase(_) => false,
        }
    }
}

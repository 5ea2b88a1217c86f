//! Serializable world snapshot handed to renderers and hosts.
//!
//! Built fresh after a tick; never fed back into the simulation.

use serde::{Deserialize, Serialize};

use crate::obstacle::Obstacle;
use crate::types::{UnitId, UnitView};

/// Result of the win/lose predicates at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    #[default]
    Ongoing,
    /// Every enemy unit is dead.
    Victory,
    /// Every player unit is dead. Takes precedence over `Victory`.
    Defeat,
}

impl BattleOutcome {
    pub fn is_decided(self) -> bool {
        self != BattleOutcome::Ongoing
    }
}

/// One unit as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    #[serde(flatten)]
    pub view: UnitView,
    /// Health bar fill, in [0, 1].
    pub hp_ratio: f64,
    pub target: Option<UnitId>,
    pub player_controlled: bool,
    pub route_active: bool,
}

/// Complete world state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed_secs: f64,
    /// Units in iteration (id) order.
    pub units: Vec<UnitSnapshot>,
    pub obstacles: Vec<Obstacle>,
    pub outcome: BattleOutcome,
}

impl WorldSnapshot {
    pub fn unit(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.units.iter().find(|u| u.view.id == id)
    }
}

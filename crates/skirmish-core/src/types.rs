//! Fundamental unit and intent types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::SkirmishError;

/// Unique unit identifier. Allocated monotonically by the world, never reused.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnitId(pub u64);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side a unit fights for. Units attack and detect only the opposing faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    /// The faction this one fights against.
    pub fn opponent(self) -> Faction {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Immutable per-unit parameters. Shared by every unit created from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub max_hp: f64,
    /// Distance units per second.
    pub max_speed: f64,
    /// Radius within which player units notice enemies.
    pub detect_range: f64,
    /// Melee reach, measured center to center.
    pub attack_range: f64,
    /// Seconds between attacks.
    pub attack_interval: f64,
    pub attack_damage: f64,
    /// Collision-circle radius.
    pub intersect_range: f64,
    pub faction: Faction,
}

impl UnitSpec {
    /// Check the structural precondition every unit relies on.
    pub fn validate(&self) -> Result<(), SkirmishError> {
        let fields = [
            ("max_hp", self.max_hp),
            ("max_speed", self.max_speed),
            ("detect_range", self.detect_range),
            ("attack_range", self.attack_range),
            ("attack_interval", self.attack_interval),
            ("attack_damage", self.attack_damage),
            ("intersect_range", self.intersect_range),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SkirmishError::InvalidSpec {
                    field,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(SkirmishError::InvalidSpec {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        if self.max_hp <= 0.0 {
            return Err(SkirmishError::InvalidSpec {
                field: "max_hp",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Published, read-only state of a unit as seen by strategies and renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub faction: Faction,
    pub position: DVec2,
    /// Radians, 0 = +x axis, counter-clockwise toward +y.
    pub heading: f64,
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub alive: bool,
}

impl UnitView {
    /// Fraction of health remaining, in [0, 1].
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }
}

/// Declarative per-tick movement request returned by a decision strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MoveIntent {
    /// Head toward a point, optionally below max speed.
    MoveTo { point: DVec2, speed: Option<f64> },
    /// Move along a velocity vector; its length is capped at max speed.
    MoveVel { vel: DVec2 },
    /// Stop in place, keeping the current heading.
    Idle,
    /// Wander with a small random turn each tick.
    RandomWalk { speed: Option<f64> },
    /// Keep heading and speed unchanged.
    SameAsBefore,
}

impl MoveIntent {
    pub fn move_to(point: DVec2) -> Self {
        MoveIntent::MoveTo { point, speed: None }
    }

    pub fn random_walk() -> Self {
        MoveIntent::RandomWalk { speed: None }
    }
}

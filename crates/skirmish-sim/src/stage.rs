//! Stage definitions: unit groups and obstacles to populate a world with.
//!
//! Five stages are built in, played on an 800 x 450 field with the player
//! army on the left and the enemy on the right. A stage can also be
//! loaded from JSON.

use std::sync::Arc;

use glam::DVec2;
use log::info;
use serde::{Deserialize, Serialize};

use skirmish_ai::DecisionKind;
use skirmish_core::clock::Clock;
use skirmish_core::obstacle::Obstacle;
use skirmish_core::types::{Faction, UnitSpec};
use skirmish_core::SkirmishError;

use crate::world::{SimConfig, World};

/// Number of built-in stages, numbered from 1.
pub const STAGE_COUNT: u32 = 5;

/// Units sharing one spec and one kind of strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitGroup {
    pub spec: UnitSpec,
    pub decision: DecisionKind,
    /// Initial heading in radians for every unit in the group.
    #[serde(default)]
    pub heading: f64,
    pub positions: Vec<DVec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    pub groups: Vec<UnitGroup>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl StageConfig {
    /// Built-in stage `number`, 1 through `STAGE_COUNT`.
    pub fn builtin(number: u32) -> Result<Self, SkirmishError> {
        match number {
            1 => Ok(build_skirmish()),
            2 => Ok(build_crossroads()),
            3 => Ok(build_breach()),
            4 => Ok(build_pincer()),
            5 => Ok(build_last_stand()),
            other => Err(SkirmishError::UnknownStage(other)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SkirmishError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SkirmishError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn unit_count(&self) -> usize {
        self.groups.iter().map(|g| g.positions.len()).sum()
    }

    /// Create a world and populate it. Fails on the first invalid spec.
    pub fn build_world(&self, config: SimConfig, clock: Box<dyn Clock>) -> Result<World, SkirmishError> {
        let mut world = World::new(config, clock);
        self.populate(&mut world)?;
        Ok(world)
    }

    /// Add this stage's obstacles and units to `world`.
    pub fn populate(&self, world: &mut World) -> Result<(), SkirmishError> {
        for obstacle in &self.obstacles {
            world.add_obstacle(*obstacle);
        }
        for group in &self.groups {
            let spec = Arc::new(group.spec.clone());
            for &position in &group.positions {
                world.add_unit(
                    Arc::clone(&spec),
                    position,
                    group.heading,
                    Some(group.decision.build()),
                )?;
            }
        }
        info!(
            "Loaded stage \"{}\": {} units, {} obstacles",
            self.name,
            self.unit_count(),
            self.obstacles.len()
        );
        Ok(())
    }
}

// ---- Unit templates ----

fn infantry() -> UnitSpec {
    UnitSpec {
        max_hp: 100.0,
        max_speed: 60.0,
        detect_range: 150.0,
        attack_range: 20.0,
        attack_interval: 1.0,
        attack_damage: 10.0,
        intersect_range: 8.0,
        faction: Faction::Player,
    }
}

fn raider() -> UnitSpec {
    UnitSpec {
        max_hp: 80.0,
        max_speed: 50.0,
        detect_range: 150.0,
        attack_range: 18.0,
        attack_interval: 1.2,
        attack_damage: 8.0,
        intersect_range: 8.0,
        faction: Faction::Enemy,
    }
}

fn brute() -> UnitSpec {
    UnitSpec {
        max_hp: 220.0,
        max_speed: 35.0,
        detect_range: 150.0,
        attack_range: 24.0,
        attack_interval: 1.6,
        attack_damage: 22.0,
        intersect_range: 12.0,
        faction: Faction::Enemy,
    }
}

fn players(positions: Vec<DVec2>) -> UnitGroup {
    UnitGroup {
        spec: infantry(),
        decision: DecisionKind::Player,
        heading: 0.0,
        positions,
    }
}

fn enemies(spec: UnitSpec, positions: Vec<DVec2>) -> UnitGroup {
    UnitGroup {
        spec,
        decision: DecisionKind::Chase,
        heading: std::f64::consts::PI,
        positions,
    }
}

/// `count` positions in a vertical line centered on `y`.
fn column(x: f64, y: f64, spacing: f64, count: usize) -> Vec<DVec2> {
    let top = y - spacing * (count.saturating_sub(1)) as f64 / 2.0;
    (0..count)
        .map(|i| DVec2::new(x, top + spacing * i as f64))
        .collect()
}

/// `columns` side-by-side columns starting at `x`, `gap` apart.
fn block(x: f64, y: f64, gap: f64, columns: usize, per_column: usize) -> Vec<DVec2> {
    (0..columns)
        .flat_map(|c| column(x + gap * c as f64, y, gap, per_column))
        .collect()
}

// ---- Stages ----

/// Stage 1: open field, small enemy patrol.
fn build_skirmish() -> StageConfig {
    StageConfig {
        name: "Skirmish".into(),
        groups: vec![
            players(column(120.0, 225.0, 40.0, 5)),
            enemies(raider(), column(640.0, 225.0, 50.0, 3)),
        ],
        obstacles: Vec::new(),
    }
}

/// Stage 2: even numbers around a central rock.
fn build_crossroads() -> StageConfig {
    StageConfig {
        name: "Crossroads".into(),
        groups: vec![
            players(block(100.0, 225.0, 40.0, 2, 3)),
            enemies(raider(), block(640.0, 225.0, 40.0, 2, 3)),
        ],
        obstacles: vec![Obstacle::circle(400.0, 225.0, 60.0)],
    }
}

/// Stage 3: two walls with a single gap, brutes behind.
fn build_breach() -> StageConfig {
    StageConfig {
        name: "Breach".into(),
        groups: vec![
            players(block(100.0, 225.0, 40.0, 2, 4)),
            enemies(raider(), block(600.0, 225.0, 40.0, 2, 4)),
            enemies(brute(), column(720.0, 225.0, 80.0, 2)),
        ],
        obstacles: vec![
            Obstacle::rectangle(380.0, 0.0, 40.0, 180.0),
            Obstacle::rectangle(380.0, 270.0, 40.0, 180.0),
        ],
    }
}

/// Stage 4: enemies close in from both flanks.
fn build_pincer() -> StageConfig {
    StageConfig {
        name: "Pincer".into(),
        groups: vec![
            players(block(360.0, 225.0, 40.0, 2, 4)),
            enemies(raider(), block(60.0, 225.0, 40.0, 2, 3)),
            enemies(raider(), block(700.0, 225.0, 40.0, 2, 3)),
        ],
        obstacles: vec![
            Obstacle::line(200.0, 60.0, 200.0, 160.0),
            Obstacle::line(200.0, 290.0, 200.0, 390.0),
            Obstacle::line(600.0, 60.0, 600.0, 160.0),
            Obstacle::line(600.0, 290.0, 600.0, 390.0),
        ],
    }
}

/// Stage 5: outnumbered, with cover.
fn build_last_stand() -> StageConfig {
    StageConfig {
        name: "Last Stand".into(),
        groups: vec![
            players(block(80.0, 225.0, 40.0, 2, 5)),
            enemies(raider(), block(560.0, 225.0, 40.0, 3, 4)),
            enemies(brute(), column(720.0, 225.0, 60.0, 4)),
        ],
        obstacles: vec![
            Obstacle::circle(300.0, 120.0, 40.0),
            Obstacle::circle(300.0, 330.0, 40.0),
            Obstacle::rectangle(420.0, 190.0, 30.0, 70.0),
            Obstacle::line(0.0, 0.0, 800.0, 0.0),
            Obstacle::line(0.0, 450.0, 800.0, 450.0),
        ],
    }
}

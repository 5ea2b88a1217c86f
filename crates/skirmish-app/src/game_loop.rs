//! Game loop thread: one world tick per frame with the measured frame delta.
//!
//! The world is created inside this thread. Commands arrive via an `mpsc`
//! channel and are drained at the start of each frame. The latest snapshot
//! is stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use skirmish_core::clock::SystemClock;
use skirmish_core::constants::{DEFAULT_FRAME_RATE, MAX_FRAME_DELTA_SECS};
use skirmish_core::state::{BattleOutcome, WorldSnapshot};
use skirmish_core::types::Faction;
use skirmish_sim::{OrderTool, SimConfig, StageConfig, World};

use crate::state::GameLoopCommand;

/// Seconds of battle between progress log lines.
const PROGRESS_INTERVAL_SECS: f64 = 5.0;

/// Everything the loop needs to run one battle.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub stage: StageConfig,
    pub sim: SimConfig,
    pub frame_rate: u32,
    /// Stop after this much battle time even if undecided.
    pub max_secs: Option<f64>,
}

impl LoopSettings {
    pub fn new(stage: StageConfig) -> Self {
        Self {
            stage,
            sim: SimConfig::default(),
            frame_rate: DEFAULT_FRAME_RATE,
            max_secs: None,
        }
    }

    /// Nominal duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

/// How a battle ended, as the result screen would show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    pub stage: String,
    pub outcome: BattleOutcome,
    pub elapsed_secs: f64,
    pub frames: u64,
    pub players_alive: usize,
    pub enemies_alive: usize,
}

impl BattleReport {
    fn from_world(stage: &str, world: &World) -> Self {
        Self {
            stage: stage.to_string(),
            outcome: world.outcome(),
            elapsed_secs: world.elapsed_time(),
            frames: world.tick_count(),
            players_alive: alive_count(world, Faction::Player),
            enemies_alive: alive_count(world, Faction::Enemy),
        }
    }
}

fn alive_count(world: &World, faction: Faction) -> usize {
    world
        .units()
        .filter(|unit| unit.is_alive() && unit.spec().faction == faction)
        .count()
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the battle report.
pub fn spawn_game_loop(
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<Result<BattleReport>>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(settings, cmd_rx, &latest_snapshot))
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// Runs until the battle is decided, `max_secs` passes, or Shutdown/disconnect.
fn run_game_loop(
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) -> Result<BattleReport> {
    let mut world = settings
        .stage
        .build_world(settings.sim, Box::new(SystemClock::new()))
        .with_context(|| format!("failed to build stage \"{}\"", settings.stage.name))?;
    let mut orders = OrderTool::default();

    let frame = settings.frame_duration();
    let max_delta = Duration::from_secs_f64(MAX_FRAME_DELTA_SECS);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    let mut next_progress = PROGRESS_INTERVAL_SECS;

    info!(
        "Stage \"{}\" started with {} units at {} fps",
        settings.stage.name,
        world.unit_count(),
        settings.frame_rate
    );

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(input)) => orders.update(&input, &mut world),
                Ok(GameLoopCommand::Shutdown) => {
                    info!("Shutdown requested");
                    return Ok(BattleReport::from_world(&settings.stage.name, &world));
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("Command channel closed, stopping");
                    return Ok(BattleReport::from_world(&settings.stage.name, &world));
                }
            }
        }

        // 2. Advance one frame with the measured delta, clamped after hitches
        let now = Instant::now();
        let delta = now.duration_since(last_frame).min(max_delta);
        last_frame = now;
        world.update(delta);

        // 3. Store latest snapshot for polling
        let snapshot = world.snapshot();
        let outcome = snapshot.outcome;
        let elapsed = snapshot.elapsed_secs;
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if elapsed >= next_progress {
            next_progress += PROGRESS_INTERVAL_SECS;
            info!(
                "t={:.1}s players={} enemies={}",
                elapsed,
                alive_count(&world, Faction::Player),
                alive_count(&world, Faction::Enemy)
            );
        }

        // 4. Stop when decided or out of time
        if outcome.is_decided() || settings.max_secs.is_some_and(|max| elapsed >= max) {
            let report = BattleReport::from_world(&settings.stage.name, &world);
            info!(
                "Stage \"{}\" ended: {:?} after {:.1}s",
                report.stage, report.outcome, report.elapsed_secs
            );
            return Ok(report);
        }

        // 5. Sleep until next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind; reset rather than spiral
            next_frame_time = now;
        }
    }
}

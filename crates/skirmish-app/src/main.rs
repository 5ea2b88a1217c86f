//! Headless battle runner.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use skirmish_app::game_loop::LoopSettings;
use skirmish_app::state::AppState;
use skirmish_core::constants::DEFAULT_FRAME_RATE;
use skirmish_sim::{SimConfig, StageConfig, STAGE_COUNT};

#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about = "Run a SKIRMISH stage headless")]
struct Cli {
    /// Built-in stage number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=i64::from(STAGE_COUNT)))]
    stage: u32,

    /// Load the stage from a JSON file instead
    #[arg(long, conflicts_with = "stage")]
    stage_file: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many seconds of battle
    #[arg(long)]
    max_secs: Option<f64>,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Print the stage as JSON and exit
    #[arg(long)]
    dump_stage: bool,
}

fn load_stage(cli: &Cli) -> Result<StageConfig> {
    match &cli.stage_file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            StageConfig::from_json(&json)
                .with_context(|| format!("failed to parse stage {}", path.display()))
        }
        None => StageConfig::builtin(cli.stage).context("failed to load built-in stage"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let stage = load_stage(&cli)?;
    if cli.dump_stage {
        println!("{}", stage.to_json()?);
        return Ok(());
    }

    let settings = LoopSettings {
        sim: SimConfig {
            seed: cli.seed,
            ..SimConfig::default()
        },
        frame_rate: cli.fps,
        max_secs: cli.max_secs,
        ..LoopSettings::new(stage)
    };

    let state = AppState::new();
    state.start(settings)?;
    let report = state.wait()?;

    info!(
        "{:?}: {} players and {} enemies standing after {:.1}s",
        report.outcome, report.players_alive, report.enemies_alive, report.elapsed_secs
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

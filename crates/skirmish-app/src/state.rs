//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Result};

use skirmish_core::input::InputSnapshot;
use skirmish_core::state::WorldSnapshot;

use crate::game_loop::{self, BattleReport, LoopSettings};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// One frame of pointer input for the order tool.
    Input(InputSnapshot),
    /// Stop the loop and report the battle as it stands.
    Shutdown,
}

/// Handles to a running game loop.
///
/// `Mutex<Option<...>>` for everything that only exists while a loop runs;
/// `Arc<Mutex<...>>` for the snapshot the loop thread writes.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<Result<BattleReport>>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop. Fails if one is already running.
    pub fn start(&self, settings: LoopSettings) -> Result<()> {
        let mut handle = self
            .loop_handle
            .lock()
            .map_err(|_| anyhow!("loop handle lock poisoned"))?;
        if handle.is_some() {
            bail!("game loop already running");
        }
        let (tx, join) = game_loop::spawn_game_loop(settings, Arc::clone(&self.latest_snapshot))?;
        *handle = Some(join);
        if let Ok(mut command_tx) = self.command_tx.lock() {
            *command_tx = Some(tx);
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.loop_handle
            .lock()
            .map(|handle| handle.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    pub fn send_input(&self, input: InputSnapshot) -> Result<()> {
        self.send(GameLoopCommand::Input(input))
    }

    /// Ask the loop to stop. A loop that already finished is not an error.
    pub fn shutdown(&self) {
        let _ = self.send(GameLoopCommand::Shutdown);
    }

    fn send(&self, command: GameLoopCommand) -> Result<()> {
        let command_tx = self
            .command_tx
            .lock()
            .map_err(|_| anyhow!("command channel lock poisoned"))?;
        let tx = command_tx
            .as_ref()
            .ok_or_else(|| anyhow!("game loop not started"))?;
        tx.send(command)
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    pub fn snapshot(&self) -> Option<WorldSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Block until the loop ends and return its report.
    pub fn wait(&self) -> Result<BattleReport> {
        let join = self
            .loop_handle
            .lock()
            .map_err(|_| anyhow!("loop handle lock poisoned"))?
            .take()
            .ok_or_else(|| anyhow!("game loop not started"))?;
        let report = join
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))??;
        if let Ok(mut command_tx) = self.command_tx.lock() {
            *command_tx = None;
        }
        Ok(report)
    }
}

//! Per-frame pointer input consumed by the order tool.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pointer state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub pos: DVec2,
    pub is_down: bool,
    /// Pressed during this frame.
    pub is_just_down: bool,
    /// Released during this frame.
    pub is_just_up: bool,
}

/// Folds raw pointer events into an `InputSnapshot`.
/// Hosts call the event methods as events arrive, read `snapshot()` once per
/// frame, then call `end_frame()`.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: InputSnapshot,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, pos: DVec2) {
        self.state.is_down = true;
        self.state.is_just_down = true;
        self.state.pos = pos;
    }

    pub fn pointer_up(&mut self, pos: DVec2) {
        self.state.is_down = false;
        self.state.is_just_up = true;
        self.state.pos = pos;
    }

    pub fn pointer_move(&mut self, pos: DVec2) {
        self.state.pos = pos;
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.state
    }

    /// Clear the edge-triggered flags.
    pub fn end_frame(&mut self) {
        self.state.is_just_down = false;
        self.state.is_just_up = false;
    }
}

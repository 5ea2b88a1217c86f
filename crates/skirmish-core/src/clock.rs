//! Clock abstraction for elapsed-time reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Source of "now", in seconds from an arbitrary origin.
pub trait Clock: Send {
    fn now_secs(&self) -> f64;
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually driven clock. Clones share the same time, so a host can keep
/// one handle and give another to the world.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        let clock = Self::default();
        clock.set(start_secs);
        clock
    }

    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now_secs() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

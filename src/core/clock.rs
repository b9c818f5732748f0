//! Frame clock: decides when the simulation may advance.
//!
//! The loop polls input and renders as fast as it likes; obstacle movement is
//! gated on wall-clock time so difficulty is a property of the level, not of
//! how fast the terminal happens to be.

use std::time::{Duration, Instant};

use crate::types::tick_interval_ms;

/// Tracks the last accepted simulation tick against a configured interval.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// Clock for a difficulty level (higher level = shorter interval).
    pub fn for_level(level: u8, now: Instant) -> Self {
        Self::new(Duration::from_millis(u64::from(tick_interval_ms(level))), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether enough time has elapsed since the last accepted tick.
    ///
    /// Pure with respect to `now`; callers that act on a `true` result must
    /// follow up with [`mark_advanced`](Self::mark_advanced).
    pub fn should_advance(&self, now: Instant) -> bool {
        now.duration_since(self.last) >= self.interval
    }

    /// Reset the reference point after a tick was taken.
    pub fn mark_advanced(&mut self, now: Instant) {
        self.last = now;
    }
}

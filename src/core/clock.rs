//! Frame clocks.
//!
//! A [`Clock`] is ticked once per frame and reports the elapsed time since the
//! previous frame. The session keeps its own logical timeline built from these
//! deltas, so swapping the wall clock for a [`FixedClock`] makes a run fully
//! deterministic.

use crate::core::constants::{FRAME_INTERVAL_MS, MAX_FRAME_DELTA_SECONDS};
use std::time::Instant;

/// Source of per-frame delta time and monotonic elapsed time, in seconds.
pub trait Clock {
    /// Advance the clock by one frame and return the frame's delta time.
    fn tick(&mut self) -> f64;

    /// Delta time reported by the most recent `tick`.
    fn delta_time(&self) -> f64;

    /// Total elapsed time across all ticks.
    fn elapsed(&self) -> f64;
}

/// Wall-clock frame timer backed by [`Instant`].
pub struct FrameClock {
    total_time: f64,
    delta_time: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Clamp so a stalled terminal doesn't teleport the flyer through a pipe
        self.delta_time = elapsed.min(MAX_FRAME_DELTA_SECONDS);
        self.total_time += self.delta_time;
        self.delta_time
    }

    fn delta_time(&self) -> f64 {
        self.delta_time
    }

    fn elapsed(&self) -> f64 {
        self.total_time
    }
}

/// Deterministic clock that advances by a fixed step every tick.
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: f64,
    total_time: f64,
    ticked: bool,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS as f64 / 1000.0)
    }
}

impl FixedClock {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            total_time: 0.0,
            ticked: false,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f64 {
        self.ticked = true;
        self.total_time += self.step;
        self.step
    }

    fn delta_time(&self) -> f64 {
        if self.ticked {
            self.step
        } else {
            0.0
        }
    }

    fn elapsed(&self) -> f64 {
        self.total_time
    }
}

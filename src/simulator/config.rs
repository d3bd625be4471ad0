//! Simulation configuration.

use crate::core::config::{Difficulty, SessionConfig};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated sessions
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per run before the run is cut off
    pub max_frames_per_run: u64,

    /// Fixed frame delta in seconds
    pub frame_dt: f64,

    /// Difficulty preset used when no explicit session config is given
    pub difficulty: Difficulty,

    /// Explicit session tunables (overrides `difficulty`)
    pub session: Option<SessionConfig>,

    /// Chance per frame that the autopilot misses a flap it wanted
    pub miss_chance: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_frames_per_run: 60 * 60 * 5,
            frame_dt: 1.0 / 60.0,
            difficulty: Difficulty::Apprentice,
            session: None,
            miss_chance: 0.1,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Session tunables for each run.
    pub fn session_config(&self) -> SessionConfig {
        self.session
            .clone()
            .unwrap_or_else(|| SessionConfig::for_difficulty(self.difficulty))
    }

    /// Quick config for a difficulty sweep
    pub fn quick(difficulty: Difficulty) -> Self {
        Self {
            num_runs: 50,
            max_frames_per_run: 60 * 60,
            difficulty,
            ..Default::default()
        }
    }
}

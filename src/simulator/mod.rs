//! Headless simulator for difficulty tuning.
//!
//! Plays many sessions with an autopilot at the controls to measure:
//! - Score distribution per difficulty
//! - How long runs survive
//! - What ends them (obstacles vs. leaving the world)
//!
//! Runs go through the same `GameRunner` as interactive play.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;

//! Skyward - endless obstacle-runner simulation.
//!
//! The library holds the frame-by-frame simulation (`game`), its clock and
//! configuration (`core`) and a headless autopilot simulator (`simulator`).
//! Rendering, audio and input live behind the sink and source traits in
//! [`game::sinks`].

pub mod build_info;
pub mod core;
pub mod game;
pub mod simulator;

pub use crate::core::{Clock, ConfigError, Difficulty, FixedClock, FrameClock, SessionConfig};
pub use crate::game::{GameRunner, Session, SessionEvent, SessionState, TickResult};

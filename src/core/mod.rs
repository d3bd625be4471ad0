//! Clock, configuration and error types shared by the simulation and binaries.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;

pub use clock::{Clock, FixedClock, FrameClock};
pub use config::{config_path, Difficulty, SessionConfig};
pub use error::{ConfigError, Result};

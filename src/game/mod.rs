//! The obstacle-runner simulation.
//!
//! A flyer moves forward at constant speed under gravity while a spawner
//! places obstacle pairs ahead of it. Hitting an obstacle (or leaving the
//! world's vertical bounds) ends the session; passing through a gap scores.

pub mod collision;
pub mod field;
pub mod flyer;
pub mod runner;
pub mod session;
pub mod sinks;
pub mod spawner;
pub mod types;

pub use collision::{Collidable, CollisionClassifier, Contact};
pub use field::{ObstacleField, ObstaclePair, ObstacleVolume, ScoreZone};
pub use flyer::FlyerBody;
pub use runner::GameRunner;
pub use session::{Session, SessionEvent, TickResult};
pub use sinks::{
    dispatch, AudioLog, AudioSink, DisplayLog, DisplaySink, FrameInput, InputSource, NullSink,
};
pub use spawner::{ObstacleSpawner, SpawnTask, SpawnedPair};
pub use types::*;

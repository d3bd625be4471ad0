//! Data types shared across the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point or extent in world space. `y` is up, `z` is the forward lane axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

/// Axis-aligned collision volume described by its center and half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// A cube of the given half size.
    pub fn cube(center: Vec3, half_size: f64) -> Self {
        Self::new(center, Vec3::splat(half_size))
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(
            self.center.x - self.half_extents.x,
            self.center.y - self.half_extents.y,
            self.center.z - self.half_extents.z,
        )
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(
            self.center.x + self.half_extents.x,
            self.center.y + self.half_extents.y,
            self.center.z + self.half_extents.z,
        )
    }

    /// True when the interiors intersect. Touching faces do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.half_extents.x + other.half_extents.x
            && (self.center.y - other.center.y).abs() < self.half_extents.y + other.half_extents.y
            && (self.center.z - other.center.z).abs() < self.half_extents.z + other.half_extents.z
    }
}

/// What an overlap with a volume means for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Touching it ends the session.
    Lethal,
    /// Passing through it scores a point.
    Scoring,
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    Dead,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }
}

/// Audio cues emitted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Flap,
    Score,
    Death,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Overlapped a lethal obstacle volume.
    Obstacle,
    /// Left the vertical bounds of the world.
    OutOfBounds,
}

impl DeathCause {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Obstacle => "obstacle",
            Self::OutOfBounds => "out of bounds",
        }
    }
}

/// Identifier of an obstacle pair inside a session's field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

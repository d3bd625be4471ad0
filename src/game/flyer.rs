//! The flyer: vertical physics, forward motion and derived pitch.

use super::types::{Aabb, Vec3};
use crate::core::config::SessionConfig;
use crate::core::constants::{MAX_PITCH_DEGREES, PITCH_VELOCITY_SCALE};

/// The single player-controlled actor.
///
/// Only the vertical (`y`) and forward (`z`) axes are driven. Pitch is never
/// stored; it is derived from the vertical velocity on demand.
#[derive(Debug, Clone)]
pub struct FlyerBody {
    pub position: Vec3,
    /// Vertical velocity in units/second (positive = upward).
    pub velocity_y: f64,
    /// Constant forward speed in units/second.
    pub forward_speed: f64,

    initial_position: Vec3,
    jump_impulse: f64,
    gravity: f64,
    terminal_velocity: f64,
    half_extent: f64,
}

impl FlyerBody {
    /// Create a flyer at the origin, at rest.
    pub fn new(config: &SessionConfig) -> Self {
        Self::at(Vec3::ZERO, config)
    }

    /// Create a flyer at rest at the given position.
    pub fn at(position: Vec3, config: &SessionConfig) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            forward_speed: config.forward_speed,
            initial_position: position,
            jump_impulse: config.jump_impulse,
            gravity: config.gravity,
            terminal_velocity: config.terminal_velocity,
            half_extent: config.flyer_half_extent,
        }
    }

    /// Set vertical velocity to the jump impulse, discarding the old value.
    pub fn apply_flap(&mut self) {
        self.velocity_y = self.jump_impulse;
    }

    /// Advance one frame: gravity, terminal-velocity clamp, then position.
    pub fn integrate(&mut self, dt: f64) {
        self.velocity_y -= self.gravity * dt;
        if self.velocity_y < -self.terminal_velocity {
            self.velocity_y = -self.terminal_velocity;
        }
        self.position.y += self.velocity_y * dt;
        self.position.z += self.forward_speed * dt;
    }

    /// Nose-down pitch in degrees, 0 while rising or level, 90 at full dive.
    pub fn pitch_degrees(&self) -> f64 {
        let t = (-self.velocity_y / PITCH_VELOCITY_SCALE).clamp(0.0, 1.0);
        MAX_PITCH_DEGREES * t
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.position, self.half_extent)
    }

    /// Back to the spawn position, at rest.
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity_y = 0.0;
    }
}

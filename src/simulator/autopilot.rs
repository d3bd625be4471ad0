//! Scripted pilot that steers toward the next gap.

use crate::game::field::ObstaclePair;
use crate::game::session::Session;
use crate::game::sinks::FrameInput;
use rand::Rng;

/// Flaps whenever the flyer has sunk below the next gap's center and is no
/// longer rising. Occasionally misses a flap to make runs differ.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// How far below the target the flyer may sink before flapping.
    pub margin: f64,
    /// Chance per frame of ignoring a wanted flap.
    pub miss_chance: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            margin: 0.5,
            miss_chance: 0.0,
        }
    }
}

impl Autopilot {
    /// Out-of-range chances are clamped; NaN counts as never missing.
    pub fn new(miss_chance: f64) -> Self {
        let miss_chance = if miss_chance.is_nan() {
            0.0
        } else {
            miss_chance.clamp(0.0, 1.0)
        };
        Self {
            miss_chance,
            ..Default::default()
        }
    }

    /// The nearest pair the flyer hasn't fully cleared yet.
    pub fn next_pair<'a>(&self, session: &'a Session) -> Option<&'a ObstaclePair> {
        let config = session.config();
        let clear_distance = config.obstacle_width / 2.0 + config.flyer_half_extent;
        let z = session.flyer().position.z;
        session
            .field()
            .pairs()
            .iter()
            .filter(|p| p.lane + clear_distance >= z)
            .min_by(|a, b| a.lane.total_cmp(&b.lane))
    }

    /// Height the pilot is aiming for.
    pub fn target_height(&self, session: &Session) -> f64 {
        match self.next_pair(session) {
            Some(pair) => pair.gap_center,
            None => {
                let config = session.config();
                (config.min_height + config.max_height) / 2.0
            }
        }
    }

    /// Input for this frame.
    pub fn decide<R: Rng>(&self, session: &Session, rng: &mut R) -> FrameInput {
        if !session.state().is_running() {
            return FrameInput::NONE;
        }
        let flyer = session.flyer();
        let wants_flap =
            flyer.position.y < self.target_height(session) - self.margin && flyer.velocity_y <= 0.0;
        if wants_flap && !rng.gen_bool(self.miss_chance) {
            FrameInput::FLAP
        } else {
            FrameInput::NONE
        }
    }
}

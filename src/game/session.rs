//! Session state machine: Running / Dead, score, restart.
//!
//! A session owns the flyer, the obstacle field and the spawner, and runs them
//! on its own timeline (the sum of frame deltas since the last start). All
//! mutation happens from `update` or the signal methods, so there is a single
//! writer and no locking.

use super::collision::CollisionClassifier;
use super::field::ObstacleField;
use super::flyer::FlyerBody;
use super::sinks::FrameInput;
use super::spawner::{ObstacleSpawner, SpawnedPair};
use super::types::{DeathCause, EntityId, SessionState};
use crate::core::config::SessionConfig;
use crate::core::error::Result;
use rand::Rng;
use tracing::{debug, info, warn};

/// Something that happened during a frame.
///
/// Front ends map these to display and audio calls; the session itself never
/// touches a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A flap was applied.
    Flapped,
    /// The spawner created a pair and its score zone.
    PairSpawned(SpawnedPair),
    /// A pair reached the end of its lifetime and was removed.
    PairExpired(EntityId),
    /// A score zone was passed for the first time.
    Scored { pair: EntityId, score: u32 },
    /// Running -> Dead.
    Died { cause: DeathCause, score: u32 },
    /// Dead -> Running.
    Restarted,
}

/// Result of one frame - everything the presentation layer needs.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Events in the order they happened
    pub events: Vec<SessionEvent>,
    /// State after the frame
    pub state: SessionState,
    /// Score after the frame
    pub score: u32,
    /// Session time after the frame
    pub time: f64,
}

impl TickResult {
    pub fn died(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|e| match e {
            SessionEvent::Died { cause, .. } => Some(*cause),
            _ => None,
        })
    }

    pub fn points_scored(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Scored { .. }))
            .count()
    }

    pub fn restarted(&self) -> bool {
        self.events.contains(&SessionEvent::Restarted)
    }
}

/// One play-through, from start or restart to death.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    score: u32,
    flyer: FlyerBody,
    field: ObstacleField,
    spawner: ObstacleSpawner,
    /// Seconds since the last start, advanced only while running.
    time: f64,
    death_cause: Option<DeathCause>,
    restarts: u32,
    pending: Vec<SessionEvent>,
}

impl Session {
    /// Validate the config and start a running session with its spawner.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;

        if config.pair_spacing() < config.obstacle_width && config.min_pair_spacing == 0.0 {
            warn!(
                spacing = config.pair_spacing(),
                width = config.obstacle_width,
                "obstacle pairs will overlap: spawn spacing is smaller than obstacle width"
            );
        }

        let flyer = FlyerBody::new(&config);
        let mut spawner = ObstacleSpawner::new();
        spawner.start(0.0);

        info!(
            gap_size = config.gap_size,
            forward_speed = config.forward_speed,
            spawn_interval = config.spawn_interval,
            "session started"
        );

        Ok(Self {
            config,
            state: SessionState::Running,
            score: 0,
            flyer,
            field: ObstacleField::new(),
            spawner,
            time: 0.0,
            death_cause: None,
            restarts: 0,
            pending: Vec::new(),
        })
    }

    /// Run one frame: input, physics, expiry, spawning, collisions.
    ///
    /// While dead only a restart request has any effect; while running a
    /// restart request is ignored.
    pub fn update<R: Rng>(&mut self, dt: f64, input: FrameInput, rng: &mut R) -> TickResult {
        match self.state {
            SessionState::Dead => {
                if input.restart {
                    self.reset();
                }
            }
            SessionState::Running => {
                if input.flap {
                    self.apply_flap();
                }
                self.advance(dt, rng);
            }
        }

        TickResult {
            events: self.take_events(),
            state: self.state,
            score: self.score,
            time: self.time,
        }
    }

    fn advance<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        self.flyer.integrate(dt);
        self.time += dt;

        for id in self.field.expire(self.time) {
            debug!(pair = %id, time = self.time, "pair expired");
            self.pending.push(SessionEvent::PairExpired(id));
        }

        if let Some(spawned) = self.spawner.poll(
            self.time,
            self.flyer.position.z,
            &mut self.field,
            &self.config,
            rng,
        ) {
            debug!(
                pair = %spawned.id,
                gap_center = spawned.gap_center,
                lane = spawned.lane,
                "pair spawned"
            );
            self.pending.push(SessionEvent::PairSpawned(spawned));
        }

        let contacts = CollisionClassifier::classify(&self.flyer.bounds(), &self.field);
        if CollisionClassifier::any_lethal(&contacts) {
            self.on_lethal_collision(DeathCause::Obstacle);
            return;
        }
        for pair in CollisionClassifier::scoring_pairs(&contacts) {
            self.on_score(pair);
        }

        if self.out_of_bounds() {
            self.on_lethal_collision(DeathCause::OutOfBounds);
        }
    }

    fn out_of_bounds(&self) -> bool {
        let y = self.flyer.position.y;
        self.config.floor.is_some_and(|floor| y < floor)
            || self.config.ceiling.is_some_and(|ceiling| y > ceiling)
    }

    /// Flap the flyer. No-op while dead. Returns whether the flap was applied.
    pub fn apply_flap(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.flyer.apply_flap();
        self.pending.push(SessionEvent::Flapped);
        true
    }

    /// Running -> Dead. Stops the spawner and freezes the world. Repeated
    /// calls while dead do nothing.
    pub fn on_lethal_collision(&mut self, cause: DeathCause) {
        if !self.state.is_running() {
            return;
        }
        self.state = SessionState::Dead;
        self.spawner.stop();
        self.death_cause = Some(cause);
        info!(
            score = self.score,
            time = self.time,
            cause = cause.name(),
            "flyer died"
        );
        self.pending.push(SessionEvent::Died {
            cause,
            score: self.score,
        });
    }

    /// Score the pair's zone if the session is running and the zone hasn't
    /// scored yet. Returns whether the score changed.
    pub fn on_score(&mut self, pair: EntityId) -> bool {
        if !self.state.is_running() || !self.field.mark_scored(pair) {
            return false;
        }
        self.score += 1;
        debug!(pair = %pair, score = self.score, "scored");
        self.pending.push(SessionEvent::Scored {
            pair,
            score: self.score,
        });
        true
    }

    /// Dead -> Running: zero the score, clear the field, put the flyer back
    /// and start a new spawner task. Ignored while running.
    pub fn reset(&mut self) -> bool {
        if self.state.is_running() {
            debug!("restart requested while running; ignored");
            return false;
        }
        self.score = 0;
        self.field.clear();
        self.flyer.reset();
        self.time = 0.0;
        self.death_cause = None;
        self.state = SessionState::Running;
        self.spawner.start(0.0);
        self.restarts += 1;
        info!(restarts = self.restarts, "session restarted");
        self.pending.push(SessionEvent::Restarted);
        true
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn flyer(&self) -> &FlyerBody {
        &self.flyer
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn spawner(&self) -> &ObstacleSpawner {
        &self.spawner
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

//! Periodic obstacle spawning.
//!
//! The spawner is a cooperative task on the session timeline: it is polled
//! every frame, does nothing until its wake time, spawns one pair, then sleeps
//! for `spawn_interval`. Stopping it drops the task outright; a restart starts
//! a new one.

use super::field::ObstacleField;
use super::types::EntityId;
use crate::core::config::SessionConfig;
use rand::Rng;

/// A pair created by a spawner wake-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedPair {
    pub id: EntityId,
    pub gap_center: f64,
    pub lane: f64,
}

/// State of one running spawn loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTask {
    /// Which start this task belongs to; bumped on every `start`.
    pub epoch: u64,
    /// Session time of the next wake-up.
    pub next_spawn_at: f64,
    /// Pairs spawned by this task.
    pub spawned: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ObstacleSpawner {
    task: Option<SpawnTask>,
    epochs: u64,
}

impl ObstacleSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh task that wakes immediately at `now`.
    pub fn start(&mut self, now: f64) {
        self.epochs += 1;
        self.task = Some(SpawnTask {
            epoch: self.epochs,
            next_spawn_at: now,
            spawned: 0,
        });
    }

    /// End the current task. Nothing spawns until the next `start`.
    pub fn stop(&mut self) {
        self.task = None;
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    pub fn task(&self) -> Option<&SpawnTask> {
        self.task.as_ref()
    }

    /// Wake the task if it is due: spawn one pair ahead of the flyer and
    /// schedule the next wake-up.
    ///
    /// At most one pair is spawned per poll even if a long frame covered
    /// several intervals; the backlog drains one pair per frame.
    pub fn poll<R: Rng>(
        &mut self,
        now: f64,
        flyer_z: f64,
        field: &mut ObstacleField,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Option<SpawnedPair> {
        let task = self.task.as_mut()?;
        if now < task.next_spawn_at {
            return None;
        }

        let gap_center = sample_gap_center(config, rng);
        let lane = spawn_lane(flyer_z, field.last_lane(), config);
        let id = field.spawn(gap_center, lane, config, now);

        // The first wake anchors the schedule; later wakes stay on it
        let anchor = if task.spawned == 0 {
            now
        } else {
            task.next_spawn_at
        };
        task.spawned += 1;
        task.next_spawn_at = anchor + config.spawn_interval;

        Some(SpawnedPair {
            id,
            gap_center,
            lane,
        })
    }
}

/// Uniform sample in `[min_height, max_height]`.
pub fn sample_gap_center<R: Rng>(config: &SessionConfig, rng: &mut R) -> f64 {
    rng.gen_range(config.min_height..=config.max_height)
}

/// Forward position for a new pair: the look-ahead point in front of the
/// flyer, pushed back to `min_pair_spacing` behind the previous pair when
/// that guard is enabled.
pub fn spawn_lane(flyer_z: f64, last_lane: Option<f64>, config: &SessionConfig) -> f64 {
    let lane = flyer_z + config.look_ahead;
    match last_lane {
        Some(last) if config.min_pair_spacing > 0.0 => lane.max(last + config.min_pair_spacing),
        _ => lane,
    }
}

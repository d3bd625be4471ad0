//! Main simulation runner.
//!
//! Each run plays one session through [`GameRunner`] with a fixed clock and
//! an [`Autopilot`] at the controls, so the numbers come from the same code
//! path as interactive play.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::clock::FixedClock;
use crate::core::error::Result;
use crate::game::runner::GameRunner;
use crate::game::session::SessionEvent;
use crate::game::sinks::NullSink;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let session_config = config.session_config();
    session_config.validate()?;

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, &mut rng)?;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Score {}, Survived {:.1}s, Flaps {}, Ended by {}",
                run_idx + 1,
                config.num_runs,
                run_stats.score,
                run_stats.survival_seconds,
                run_stats.flaps,
                run_stats
                    .death_cause
                    .map(|c| c.name())
                    .unwrap_or("frame limit")
            );
        }

        all_runs.push(run_stats);
    }

    Ok(SimReport::from_runs(all_runs, config.max_frames_per_run))
}

/// Play one session until the flyer dies or the frame limit is hit.
fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> Result<RunStats> {
    // The session and the pilot draw from separate streams so that pilot
    // misses don't shift the obstacle layout.
    let session_rng = ChaCha8Rng::seed_from_u64(rng.next_u64());
    let mut runner = GameRunner::new(
        config.session_config(),
        FixedClock::new(config.frame_dt),
        session_rng,
    )?;
    let pilot = Autopilot::new(config.miss_chance);
    let mut display = NullSink;
    let mut audio = NullSink;

    let mut stats = RunStats::default();

    while runner.frames() < config.max_frames_per_run {
        let mut input = pilot.decide(runner.session(), rng);
        let result = runner.frame(&mut input, &mut display, &mut audio);

        for event in &result.events {
            match event {
                SessionEvent::Flapped => stats.flaps += 1,
                SessionEvent::PairSpawned(_) => stats.pairs_spawned += 1,
                _ => {}
            }
        }

        if let Some(cause) = result.died() {
            stats.death_cause = Some(cause);
            break;
        }
    }

    stats.score = runner.session().score();
    stats.survival_seconds = runner.session().time();
    stats.frames = runner.frames();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Difficulty, SessionConfig};
    use crate::core::error::ConfigError;

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SimConfig {
            num_runs: 5,
            seed: Some(1234),
            max_frames_per_run: 1200,
            verbosity: 0,
            ..Default::default()
        };
        let a = run_simulation(&config).expect("valid config");
        let b = run_simulation(&config).expect("valid config");
        let scores_a: Vec<u32> = a.run_stats.iter().map(|r| r.score).collect();
        let scores_b: Vec<u32> = b.run_stats.iter().map(|r| r.score).collect();
        assert_eq!(scores_a, scores_b);
        assert_eq!(a.num_runs, 5);
    }

    #[test]
    fn test_runs_respect_frame_limit() {
        let config = SimConfig {
            num_runs: 3,
            seed: Some(9),
            max_frames_per_run: 30,
            difficulty: Difficulty::Novice,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config).expect("valid config");
        for run in &report.run_stats {
            assert!(run.frames <= 30);
        }
    }

    #[test]
    fn test_unpiloted_flyer_falls_out() {
        // Every wanted flap is missed: every run ends in a free fall
        let config = SimConfig {
            num_runs: 3,
            seed: Some(2),
            max_frames_per_run: 600,
            miss_chance: 1.0,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config).expect("valid config");
        assert_eq!(report.deaths_out_of_bounds, 3);
        assert_eq!(report.max_score, 0);
    }

    #[test]
    fn test_seed_near_max_wraps() {
        let config = SimConfig {
            num_runs: 2,
            seed: Some(u64::MAX),
            max_frames_per_run: 60,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config).expect("valid config");
        assert_eq!(report.num_runs, 2);
    }

    #[test]
    fn test_nan_miss_chance_runs() {
        let config = SimConfig {
            num_runs: 2,
            seed: Some(4),
            max_frames_per_run: 300,
            miss_chance: f64::NAN,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config).expect("valid config");
        assert_eq!(report.num_runs, 2);
    }

    #[test]
    fn test_invalid_session_config_rejected() {
        let config = SimConfig {
            session: Some(SessionConfig {
                spawn_interval: 0.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            run_simulation(&config),
            Err(ConfigError::NonPositive { .. })
        ));
    }
}

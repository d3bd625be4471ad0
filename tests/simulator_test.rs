//! Integration test: autopilot simulator
//!
//! Runs short seeded simulations at every difficulty and checks that the
//! report adds up.

use skyward::simulator::{run_simulation, SimConfig};
use skyward::Difficulty;

fn short_config(difficulty: Difficulty, seed: u64) -> SimConfig {
    SimConfig {
        num_runs: 4,
        seed: Some(seed),
        max_frames_per_run: 900,
        difficulty,
        verbosity: 0,
        ..Default::default()
    }
}

#[test]
fn test_every_difficulty_produces_a_consistent_report() {
    for difficulty in Difficulty::ALL {
        let report = run_simulation(&short_config(difficulty, 11)).expect("valid preset");

        assert_eq!(report.num_runs, 4);
        assert_eq!(report.run_stats.len(), 4);
        assert_eq!(
            report.deaths_by_obstacle + report.deaths_out_of_bounds + report.runs_timed_out,
            4,
            "{} runs must end in a death or the frame limit",
            difficulty.name()
        );
        assert_eq!(report.score_distribution.values().sum::<u32>(), 4);
        for run in &report.run_stats {
            assert!(run.frames <= 900);
            assert!(run.pairs_spawned >= 1);
            // A score needs a spawned pair behind it
            assert!(run.score <= run.pairs_spawned);
        }
    }
}

#[test]
fn test_seed_controls_the_outcome() {
    let a = run_simulation(&short_config(Difficulty::Journeyman, 77)).expect("valid preset");
    let b = run_simulation(&short_config(Difficulty::Journeyman, 77)).expect("valid preset");

    let frames_a: Vec<u64> = a.run_stats.iter().map(|r| r.frames).collect();
    let frames_b: Vec<u64> = b.run_stats.iter().map(|r| r.frames).collect();
    assert_eq!(frames_a, frames_b);
    assert_eq!(a.to_json(), b.to_json());
}

#[test]
fn test_json_report_fields() {
    let report = run_simulation(&short_config(Difficulty::Novice, 5)).expect("valid preset");
    let value: serde_json::Value = serde_json::from_str(&report.to_json()).expect("valid json");

    assert_eq!(value["num_runs"], 4);
    assert!(value["avg_score"].is_number());
    assert!(value["score_distribution"].is_object());
    assert!(value.get("run_stats").is_none());
}

#[test]
fn test_quick_config_runs() {
    let config = SimConfig {
        num_runs: 2,
        seed: Some(3),
        verbosity: 0,
        ..SimConfig::quick(Difficulty::Master)
    };
    let report = run_simulation(&config).expect("valid preset");
    assert_eq!(report.num_runs, 2);
    assert!(report.to_text().contains("SIMULATION REPORT"));
}

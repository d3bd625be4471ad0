//! Simulation report generation.

use crate::game::types::DeathCause;
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics from one simulated session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub score: u32,
    pub survival_seconds: f64,
    pub frames: u64,
    pub flaps: u32,
    pub pairs_spawned: u32,
    /// None when the run hit the frame limit alive.
    pub death_cause: Option<DeathCause>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    // Score
    pub avg_score: f64,
    pub median_score: f64,
    pub min_score: u32,
    pub max_score: u32,

    // Survival
    pub avg_survival_seconds: f64,
    pub max_survival_seconds: f64,
    pub avg_flaps_per_second: f64,

    // Deaths
    pub deaths_by_obstacle: u32,
    pub deaths_out_of_bounds: u32,

    pub score_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_frames: u64) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let runs_timed_out = runs
            .iter()
            .filter(|r| r.death_cause.is_none() && r.frames >= max_frames)
            .count() as u32;

        let avg_score = runs.iter().map(|r| r.score as f64).sum::<f64>() / divisor;
        let min_score = runs.iter().map(|r| r.score).min().unwrap_or(0);
        let max_score = runs.iter().map(|r| r.score).max().unwrap_or(0);

        let mut sorted: Vec<u32> = runs.iter().map(|r| r.score).collect();
        sorted.sort_unstable();
        let median_score = match sorted.len() {
            0 => 0.0,
            n if n % 2 == 1 => sorted[n / 2] as f64,
            n => (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0,
        };

        let total_seconds: f64 = runs.iter().map(|r| r.survival_seconds).sum();
        let avg_survival_seconds = total_seconds / divisor;
        let max_survival_seconds = runs
            .iter()
            .map(|r| r.survival_seconds)
            .fold(0.0, f64::max);
        let total_flaps: u32 = runs.iter().map(|r| r.flaps).sum();
        let avg_flaps_per_second = if total_seconds > 0.0 {
            total_flaps as f64 / total_seconds
        } else {
            0.0
        };

        let deaths_by_obstacle = runs
            .iter()
            .filter(|r| r.death_cause == Some(DeathCause::Obstacle))
            .count() as u32;
        let deaths_out_of_bounds = runs
            .iter()
            .filter(|r| r.death_cause == Some(DeathCause::OutOfBounds))
            .count() as u32;

        let mut score_distribution = BTreeMap::new();
        for run in &runs {
            *score_distribution.entry(run.score).or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_timed_out,
            avg_score,
            median_score,
            min_score,
            max_score,
            avg_survival_seconds,
            max_survival_seconds,
            avg_flaps_per_second,
            deaths_by_obstacle,
            deaths_out_of_bounds,
            score_distribution,
            run_stats: runs,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} hit the frame limit\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORE ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Average:             {:.2}\n", self.avg_score));
        report.push_str(&format!("  Median:              {:.1}\n", self.median_score));
        report.push_str(&format!(
            "  Range:               {} - {}\n\n",
            self.min_score, self.max_score
        ));

        report.push_str("── SURVIVAL ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Time Alive:      {:.1}s\n",
            self.avg_survival_seconds
        ));
        report.push_str(&format!(
            "  Longest Run:         {:.1}s\n",
            self.max_survival_seconds
        ));
        report.push_str(&format!(
            "  Flaps per Second:    {:.2}\n\n",
            self.avg_flaps_per_second
        ));

        report.push_str("── DEATHS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Obstacle:            {}\n",
            self.deaths_by_obstacle
        ));
        report.push_str(&format!(
            "  Out of Bounds:       {}\n\n",
            self.deaths_out_of_bounds
        ));

        report.push_str("── SCORE DISTRIBUTION ───────────────────────────────────────────\n");
        let widest = self.score_distribution.values().copied().max().unwrap_or(1).max(1);
        for (score, count) in &self.score_distribution {
            let bar_len = (*count as usize * 40) / widest as usize;
            report.push_str(&format!(
                "  {:>4} | {:<40} {}\n",
                score,
                "█".repeat(bar_len),
                count
            ));
        }

        report
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u32, seconds: f64, cause: Option<DeathCause>) -> RunStats {
        RunStats {
            score,
            survival_seconds: seconds,
            frames: (seconds * 60.0) as u64,
            flaps: (seconds * 2.0) as u32,
            pairs_spawned: score + 2,
            death_cause: cause,
        }
    }

    #[test]
    fn test_report_aggregates() {
        let runs = vec![
            run(1, 10.0, Some(DeathCause::Obstacle)),
            run(3, 20.0, Some(DeathCause::Obstacle)),
            run(0, 2.0, Some(DeathCause::OutOfBounds)),
            run(8, 60.0, None),
        ];
        let report = SimReport::from_runs(runs, 3600);

        assert_eq!(report.num_runs, 4);
        assert_eq!(report.runs_timed_out, 1);
        assert!((report.avg_score - 3.0).abs() < 1e-9);
        assert!((report.median_score - 2.0).abs() < 1e-9);
        assert_eq!(report.min_score, 0);
        assert_eq!(report.max_score, 8);
        assert!((report.max_survival_seconds - 60.0).abs() < 1e-9);
        assert!((report.avg_flaps_per_second - 2.0).abs() < 1e-9);
        assert_eq!(report.deaths_by_obstacle, 2);
        assert_eq!(report.deaths_out_of_bounds, 1);
        assert_eq!(report.score_distribution.get(&3), Some(&1));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), 100);
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.avg_score, 0.0);
        assert_eq!(report.median_score, 0.0);
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }

    #[test]
    fn test_json_skips_run_stats() {
        let report = SimReport::from_runs(vec![run(2, 5.0, Some(DeathCause::Obstacle))], 100);
        let json = report.to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["max_score"], 2);
        assert!(value.get("run_stats").is_none());
    }

    #[test]
    fn test_text_lists_distribution() {
        let report = SimReport::from_runs(
            vec![
                run(2, 5.0, Some(DeathCause::Obstacle)),
                run(2, 6.0, Some(DeathCause::Obstacle)),
            ],
            100,
        );
        let text = report.to_text();
        assert!(text.contains("Obstacle:            2"));
        assert!(text.contains("   2 |"));
    }
}

//! Difficulty tuning simulator CLI.
//!
//! Plays many autopiloted sessions and reports how far they get.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 200 runs on Apprentice
//!   cargo run --bin simulate -- -n 50 -d master    # 50 runs on Master
//!   cargo run --bin simulate -- --seed 42          # Reproducible run

use skyward::simulator::{run_simulation, SimConfig};
use skyward::{Difficulty, SessionConfig};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (mut config, config_path) = parse_args(&args);

    if let Some(path) = config_path {
        match SessionConfig::load(&path) {
            Ok(session) => config.session = Some(session),
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SKYWARD DIFFICULTY SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    match &config.session {
        Some(_) => println!("  Session:        from file"),
        None => println!("  Difficulty:     {}", config.difficulty.name()),
    }
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Frame Step:     {:.4}s", config.frame_dt);
    println!("  Miss Chance:    {:.0}%", config.miss_chance * 100.0);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<PathBuf>) {
    let mut config = SimConfig::default();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-d" | "--difficulty" => {
                if i + 1 < args.len() {
                    match Difficulty::from_name(&args[i + 1]) {
                        Some(difficulty) => config.difficulty = difficulty,
                        None => eprintln!("Unknown difficulty '{}', keeping {}", args[i + 1], config.difficulty.name()),
                    }
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-t" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_run = args[i + 1].parse().unwrap_or(18_000);
                    i += 1;
                }
            }
            "--miss" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<f64>() {
                        Ok(chance) if chance.is_finite() => {
                            config.miss_chance = chance.clamp(0.0, 1.0)
                        }
                        _ => eprintln!("Ignoring invalid miss chance '{}'", args[i + 1]),
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick(config.difficulty);
            }
            _ => {}
        }
        i += 1;
    }

    (config, config_path)
}

fn print_help() {
    println!("Skyward Difficulty Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Number of simulated sessions (default: 200)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -d, --difficulty <D>    Novice, Apprentice, Journeyman or Master");
    println!("    -c, --config <PATH>     Session tunables from a JSON file");
    println!("    -t, --frames <T>        Max frames per run (default: 18,000)");
    println!("    --miss <P>              Chance the autopilot misses a flap (default: 0.1)");
    println!("    -v, --verbose           Print every run");
    println!("    --json                  Save JSON report");
    println!("    --quick                 Quick test (50 runs, one minute each)");
    println!("    -h, --help              Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                        # Default run");
    println!("    cargo run --bin simulate -- -d master --quick   # Quick hard check");
    println!("    cargo run --bin simulate -- --seed 42 --json    # Reproducible, saved");
}

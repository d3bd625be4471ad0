use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use skyward::build_info;
use skyward::core::constants::FRAME_INTERVAL_MS;
use skyward::game::sinks::{AudioSink, DisplaySink, InputSource};
use skyward::game::types::Cue;
use skyward::{Difficulty, FrameClock, GameRunner, SessionConfig, SessionState};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::filter::EnvFilter;

const SCORE_ROW: u16 = 0;
const HUD_ROW: u16 = 1;
const BANNER_ROW: u16 = 3;

struct Options {
    config_path: Option<PathBuf>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
}

/// Keys pressed since the last frame.
#[derive(Default)]
struct KeyboardInput {
    flap: bool,
    restart: bool,
    quit: bool,
}

impl KeyboardInput {
    /// Drain terminal events until the frame deadline.
    fn collect(deadline: Instant) -> io::Result<Self> {
        let mut keys = Self::default();
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => keys.flap = true,
                    KeyCode::Char('r') | KeyCode::Char('R') => keys.restart = true,
                    KeyCode::Esc | KeyCode::Char('q') => keys.quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        keys.quit = true
                    }
                    _ => {}
                }
            }
        }
        Ok(keys)
    }
}

impl InputSource for KeyboardInput {
    fn flap_requested_this_frame(&mut self) -> bool {
        self.flap
    }

    fn restart_requested_this_frame(&mut self) -> bool {
        self.restart
    }
}

/// Writes the score and game-over banner straight to the terminal. Write
/// failures are dropped; the game keeps running without a display.
struct TerminalDisplay {
    out: Stdout,
}

impl DisplaySink for TerminalDisplay {
    fn show_score(&mut self, value: u32) {
        let _ = queue!(
            self.out,
            MoveTo(0, SCORE_ROW),
            Clear(ClearType::CurrentLine),
            Print(format!("Score: {}", value))
        );
    }

    fn show_game_over(&mut self, visible: bool) {
        let _ = queue!(self.out, MoveTo(0, BANNER_ROW), Clear(ClearType::CurrentLine));
        if visible {
            let _ = queue!(
                self.out,
                Print("GAME OVER - press R to restart, Esc to quit")
            );
        }
    }
}

/// Terminal bell for score and death; flaps have no sound.
struct TerminalBell {
    out: Stdout,
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if matches!(cue, Cue::Score | Cue::Death) {
            let _ = self.out.write_all(b"\x07");
        }
    }
}

/// Restores the terminal when dropped, even on early return.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config, options.seed) {
        eprintln!("Terminal error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(options: &Options) -> skyward::core::Result<SessionConfig> {
    let config = match (&options.config_path, options.difficulty) {
        (Some(path), _) => SessionConfig::load(path)?,
        (None, Some(difficulty)) => SessionConfig::for_difficulty(difficulty),
        (None, None) => SessionConfig::load_or_default()?,
    };
    config.validate()?;
    Ok(config)
}

fn run(config: SessionConfig, seed: Option<u64>) -> io::Result<()> {
    use rand::SeedableRng;
    let rng = match seed {
        Some(seed) => rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha8Rng::from_entropy(),
    };

    let mut runner = GameRunner::new(config, FrameClock::new(), rng)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let _guard = TerminalGuard::enter()?;
    let mut display = TerminalDisplay { out: io::stdout() };
    let mut audio = TerminalBell { out: io::stdout() };
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    display.show_score(0);

    loop {
        let mut keys = KeyboardInput::collect(Instant::now() + frame_interval)?;
        if keys.quit {
            break;
        }

        runner.frame(&mut keys, &mut display, &mut audio);
        draw_hud(&mut display.out, &runner)?;
        display.out.flush()?;
    }

    Ok(())
}

fn draw_hud<C: skyward::Clock, R: rand::Rng>(
    out: &mut Stdout,
    runner: &GameRunner<C, R>,
) -> io::Result<()> {
    let session = runner.session();
    let flyer = session.flyer();
    let next_gap = session
        .field()
        .pairs()
        .iter()
        .find(|p| p.lane >= flyer.position.z)
        .map(|p| format!("{:+.1} in {:.1}", p.gap_center, p.lane - flyer.position.z))
        .unwrap_or_else(|| "-".to_string());
    let state = match session.state() {
        SessionState::Running => "flying",
        SessionState::Dead => "down",
    };

    queue!(
        out,
        MoveTo(0, HUD_ROW),
        Clear(ClearType::CurrentLine),
        Print(format!(
            "{}  height {:+.2}  pitch {:>4.0}°  next gap {}  t={:.1}s",
            state,
            flyer.position.y,
            flyer.pitch_degrees(),
            next_gap,
            session.time()
        ))
    )
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config_path: None,
        difficulty: None,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-d" | "--difficulty" => {
                if i + 1 < args.len() {
                    options.difficulty = Difficulty::from_name(&args[i + 1]);
                    if options.difficulty.is_none() {
                        eprintln!("Unknown difficulty: {}", args[i + 1]);
                        std::process::exit(1);
                    }
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'skyward --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Skyward - endless obstacle runner\n");
    println!("USAGE:");
    println!("    skyward [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    -c, --config <PATH>     Load session tunables from a JSON file");
    println!("    -d, --difficulty <D>    Novice, Apprentice, Journeyman or Master");
    println!("    -s, --seed <S>          Random seed for a reproducible obstacle layout");
    println!("    -v, --version           Show version information");
    println!("    -h, --help              Show this help\n");
    println!("Without --config or --difficulty, ~/.skyward/config.json is used if present.\n");
    println!("CONTROLS:");
    println!("    Space / Up    Flap");
    println!("    R             Restart after a crash");
    println!("    Esc / Q       Quit\n");
    println!("Set RUST_LOG=debug (and redirect stderr) to trace spawns and scores.");
}

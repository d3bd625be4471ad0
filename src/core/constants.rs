// Frame timing
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const MAX_FRAME_DELTA_SECONDS: f64 = 0.25;

// Flyer physics
pub const JUMP_IMPULSE: f64 = 5.0;
pub const FORWARD_SPEED: f64 = 5.0;
pub const GRAVITY: f64 = 9.8;
pub const TERMINAL_VELOCITY: f64 = 15.0;
pub const FLYER_HALF_EXTENT: f64 = 0.3;

// Pitch derivation: pitch = lerp(0, MAX_PITCH_DEGREES, clamp(-vy / PITCH_VELOCITY_SCALE, 0, 1))
pub const MAX_PITCH_DEGREES: f64 = 90.0;
pub const PITCH_VELOCITY_SCALE: f64 = 10.0;

// Obstacle spawning
pub const SPAWN_INTERVAL_SECONDS: f64 = 2.0;
pub const OBSTACLE_LIFETIME_SECONDS: f64 = 10.0;
pub const LOOK_AHEAD_DISTANCE: f64 = 20.0;
pub const GAP_SIZE: f64 = 4.0;
pub const MIN_GAP_HEIGHT: f64 = -3.0;
pub const MAX_GAP_HEIGHT: f64 = 3.0;

// Obstacle geometry
pub const OBSTACLE_HEIGHT: f64 = 5.0;
pub const OBSTACLE_WIDTH: f64 = 1.0;
pub const SCORE_ZONE_DEPTH: f64 = 0.1;

// Vertical kill planes
pub const WORLD_FLOOR: f64 = -10.0;
pub const WORLD_CEILING: f64 = 10.0;

// Config file
pub const CONFIG_DIR_NAME: &str = ".skyward";
pub const CONFIG_FILE_NAME: &str = "config.json";

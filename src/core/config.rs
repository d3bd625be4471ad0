//! Session configuration: tunables, difficulty presets, validation and loading.

use crate::core::constants::*;
use crate::core::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Difficulty presets for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Apprentice,
        Difficulty::Journeyman,
        Difficulty::Master,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Novice)
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Master => "Master",
        }
    }

    /// Vertical opening between the two lethal volumes.
    pub fn gap_size(&self) -> f64 {
        match self {
            Self::Novice => 5.0,
            Self::Apprentice => 4.0,
            Self::Journeyman => 3.5,
            Self::Master => 3.0,
        }
    }

    /// Forward units per second.
    pub fn forward_speed(&self) -> f64 {
        match self {
            Self::Novice => 4.0,
            Self::Apprentice => 5.0,
            Self::Journeyman => 6.0,
            Self::Master => 7.0,
        }
    }

    /// Seconds between obstacle spawns.
    pub fn spawn_interval(&self) -> f64 {
        match self {
            Self::Novice => 2.5,
            Self::Apprentice => 2.0,
            Self::Journeyman => 1.75,
            Self::Master => 1.5,
        }
    }
}

/// Tunables for one session. Every field has a default, so a JSON file only
/// needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Vertical velocity set (not added) by a flap.
    pub jump_impulse: f64,
    /// Forward (z axis) speed in units per second.
    pub forward_speed: f64,
    /// Downward acceleration in units per second squared.
    pub gravity: f64,
    /// Cap on downward speed.
    pub terminal_velocity: f64,
    /// Seconds between obstacle spawns.
    pub spawn_interval: f64,
    /// Seconds an obstacle pair and its score zone stay alive.
    pub obstacle_lifetime: f64,
    /// Height of the opening between the two lethal volumes.
    pub gap_size: f64,
    /// Forward offset from the flyer at which new pairs are placed.
    pub look_ahead: f64,
    /// Lowest sampled gap center.
    pub min_height: f64,
    /// Highest sampled gap center.
    pub max_height: f64,
    /// Height of each lethal volume.
    pub obstacle_height: f64,
    /// Width and depth of each lethal volume.
    pub obstacle_width: f64,
    /// Depth of the score zone along the forward axis.
    pub score_zone_depth: f64,
    /// Half size of the flyer's cubic collision volume.
    pub flyer_half_extent: f64,
    /// Leaving below this height is lethal.
    pub floor: Option<f64>,
    /// Leaving above this height is lethal.
    pub ceiling: Option<f64>,
    /// Minimum forward distance between consecutive pairs. 0 disables the guard.
    pub min_pair_spacing: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jump_impulse: JUMP_IMPULSE,
            forward_speed: FORWARD_SPEED,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            spawn_interval: SPAWN_INTERVAL_SECONDS,
            obstacle_lifetime: OBSTACLE_LIFETIME_SECONDS,
            gap_size: GAP_SIZE,
            look_ahead: LOOK_AHEAD_DISTANCE,
            min_height: MIN_GAP_HEIGHT,
            max_height: MAX_GAP_HEIGHT,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            score_zone_depth: SCORE_ZONE_DEPTH,
            flyer_half_extent: FLYER_HALF_EXTENT,
            floor: Some(WORLD_FLOOR),
            ceiling: Some(WORLD_CEILING),
            min_pair_spacing: 0.0,
        }
    }
}

impl SessionConfig {
    /// Default tunables with the difficulty's gap, speed and spawn interval.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            gap_size: difficulty.gap_size(),
            forward_speed: difficulty.forward_speed(),
            spawn_interval: difficulty.spawn_interval(),
            ..Self::default()
        }
    }

    /// Forward distance between consecutive spawns at constant speed.
    pub fn pair_spacing(&self) -> f64 {
        self.forward_speed * self.spawn_interval
    }

    /// Reject configurations that cannot run a session.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("jump_impulse", self.jump_impulse),
            ("forward_speed", self.forward_speed),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("spawn_interval", self.spawn_interval),
            ("obstacle_lifetime", self.obstacle_lifetime),
            ("gap_size", self.gap_size),
            ("look_ahead", self.look_ahead),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_width", self.obstacle_width),
            ("score_zone_depth", self.score_zone_depth),
            ("flyer_half_extent", self.flyer_half_extent),
            ("min_pair_spacing", self.min_pair_spacing),
            ("floor", self.floor.unwrap_or(0.0)),
            ("ceiling", self.ceiling.unwrap_or(0.0)),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.min_height > self.max_height {
            return Err(ConfigError::InvalidHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        // Gap sampling needs the width of the range itself to be finite
        if !(self.max_height - self.min_height).is_finite() {
            return Err(ConfigError::NonFinite {
                field: "height range",
            });
        }

        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("obstacle_lifetime", self.obstacle_lifetime),
            ("gap_size", self.gap_size),
            ("terminal_velocity", self.terminal_velocity),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_width", self.obstacle_width),
            ("score_zone_depth", self.score_zone_depth),
            ("flyer_half_extent", self.flyer_half_extent),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("forward_speed", self.forward_speed),
            ("gravity", self.gravity),
            ("min_pair_spacing", self.min_pair_spacing),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if let (Some(floor), Some(ceiling)) = (self.floor, self.ceiling) {
            if floor >= ceiling {
                return Err(ConfigError::InvalidBounds { floor, ceiling });
            }
        }

        Ok(())
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `~/.skyward/config.json`, or the defaults if it doesn't exist.
    pub fn load_or_default() -> Result<Self> {
        match config_path() {
            Ok(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Get the full path of the user config file (`~/.skyward/config.json`).
pub fn config_path() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.jump_impulse - 5.0).abs() < f64::EPSILON);
        assert!((config.pair_spacing() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_difficulties_valid() {
        for d in Difficulty::ALL {
            let config = SessionConfig::for_difficulty(d);
            assert!(config.validate().is_ok(), "{} should be valid", d.name());
            assert!((config.gap_size - d.gap_size()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_difficulty_from_index() {
        assert_eq!(Difficulty::from_index(0), Difficulty::Novice);
        assert_eq!(Difficulty::from_index(3), Difficulty::Master);
        assert_eq!(Difficulty::from_index(99), Difficulty::Novice);
    }

    #[test]
    fn test_difficulty_from_name() {
        assert_eq!(Difficulty::from_name("master"), Some(Difficulty::Master));
        assert_eq!(
            Difficulty::from_name("Journeyman"),
            Some(Difficulty::Journeyman)
        );
        assert_eq!(Difficulty::from_name("legendary"), None);
    }

    #[test]
    fn test_difficulty_gets_harder() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[1].gap_size() < pair[0].gap_size());
            assert!(pair[1].forward_speed() > pair[0].forward_speed());
            assert!(pair[1].spawn_interval() < pair[0].spawn_interval());
        }
    }

    #[test]
    fn test_unbounded_height_range_rejected() {
        let config = SessionConfig {
            min_height: -1e308,
            max_height: 1e308,
            floor: None,
            ceiling: None,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "height range"
            })
        ));
    }

    #[test]
    fn test_inverted_height_range_rejected() {
        let config = SessionConfig {
            min_height: 4.0,
            max_height: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHeightRange { .. })
        ));
    }

    #[test]
    fn test_equal_height_range_allowed() {
        let config = SessionConfig {
            min_height: 1.0,
            max_height: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        for interval in [0.0, -1.0] {
            let config = SessionConfig {
                spawn_interval: interval,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositive {
                    field: "spawn_interval",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let config = SessionConfig {
            obstacle_lifetime: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "obstacle_lifetime",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_gravity_rejected() {
        let config = SessionConfig {
            gravity: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_gravity_and_speed_allowed() {
        let config = SessionConfig {
            gravity: 0.0,
            forward_speed: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let config = SessionConfig {
            look_ahead: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "look_ahead"
            })
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = SessionConfig {
            floor: Some(5.0),
            ceiling: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));

        let unbounded = SessionConfig {
            floor: None,
            ceiling: None,
            ..Default::default()
        };
        assert!(unbounded.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json_str(r#"{ "gap_size": 6.5, "ceiling": null }"#)
            .expect("partial config should parse");
        assert!((config.gap_size - 6.5).abs() < f64::EPSILON);
        assert_eq!(config.ceiling, None);
        assert_eq!(config.floor, Some(WORLD_FLOOR));
        assert!((config.forward_speed - FORWARD_SPEED).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = SessionConfig::from_json_str("{ gap_size: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "spawn_interval": 3.0 }"#).expect("write config");

        let config = SessionConfig::load(&path).expect("load should succeed");
        assert!((config.spawn_interval - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "min_height": 9.0, "max_height": 0.0 }"#).expect("write config");

        assert!(matches!(
            SessionConfig::load(&path),
            Err(ConfigError::InvalidHeightRange { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = SessionConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_path_format() {
        if let Ok(path) = config_path() {
            assert!(path.ends_with(".skyward/config.json"));
        }
    }
}

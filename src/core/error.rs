//! Error types for session configuration.

use thiserror::Error;

/// Reasons a [`SessionConfig`](super::config::SessionConfig) cannot start a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid gap height range: min_height {min} is above max_height {max}")]
    InvalidHeightRange { min: f64, max: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("Invalid world bounds: floor {floor} must be below ceiling {ceiling}")]
    InvalidBounds { floor: f64, ceiling: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Error types for cinder

use thiserror::Error;

/// The main error type for cinder operations
#[derive(Debug, Error)]
pub enum CinderError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid range: {field} minimum {min} exceeds maximum {max}")]
    InvalidRange {
        field: String,
        min: f64,
        max: f64,
    },

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for cinder operations
pub type Result<T> = std::result::Result<T, CinderError>;

impl From<toml::de::Error> for CinderError {
    fn from(err: toml::de::Error) -> Self {
        CinderError::TomlParseError(err.to_string())
    }
}

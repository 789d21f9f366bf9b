//! # Error Types
//!
//! Custom error types for Sensor Feed using `thiserror`.

use thiserror::Error;

/// Main error type for Sensor Feed
#[derive(Debug, Error)]
pub enum SensorFeedError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Sensor Feed
pub type Result<T> = std::result::Result<T, SensorFeedError>;

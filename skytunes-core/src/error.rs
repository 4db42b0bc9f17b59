use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - please edit it with your OpenWeatherMap API key and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("Missing required config field: {field}")]
    ConfigMissingField { field: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Location errors
    #[error("Permission to access the current location was denied")]
    LocationDenied,

    #[error("Could not determine the current location: {reason}")]
    LocationUnavailable { reason: String },

    // Weather errors
    #[error("Weather provider {provider} failed: {reason}")]
    WeatherFetchFailed { provider: String, reason: String },

    // Audio errors
    #[error("Failed to load audio from {uri}: {reason}")]
    AudioLoadFailed { uri: String, reason: String },

    // Network errors
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

//! Chart configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading chart configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML config failed to parse
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON config failed to parse
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
///
/// Invalid configuration is a startup-time failure; callers propagate these
/// out of the bootstrap without recovery.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested config file doesn't exist.
    #[error("Config file not found: {}\n\nHint: Create a nook.config.json file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Config sources failed to merge or deserialize.
    #[error("Invalid configuration: {0}\n\nHint: Check nook.config.json syntax and field types")]
    Extraction(#[from] figment::Error),

    /// A field holds an unusable value.
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// I/O error while reading config.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ConfigError`].
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

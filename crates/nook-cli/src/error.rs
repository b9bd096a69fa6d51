//! Error handling for the nook CLI.
//!
//! Hierarchical error types built on `thiserror`. Domain errors from the
//! config and discovery crates convert automatically via `#[from]`; the
//! binary boundary turns the top-level error into a miette report.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] nook_config::ConfigError),

    /// Component/fixture discovery failed
    #[error("Discovery error: {0}")]
    Discovery(#[from] nook_discovery::DiscoveryError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using [`CliError`] as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a [`CliError`] to a miette report for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Config(e) => miette::miette!("{}", e),
        CliError::Discovery(e) => miette::miette!("{}", e),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let config_err = nook_config::ConfigError::NotFound(PathBuf::from("nook.config.json"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().contains("nook.config.json"));
    }

    #[test]
    fn test_discovery_error_converts() {
        let err = nook_discovery::DiscoveryError::ComponentPathNotFound(PathBuf::from("/x"));
        let cli_err: CliError = err.into();
        assert!(matches!(cli_err, CliError::Discovery(_)));
    }

    #[test]
    fn test_io_not_found_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}

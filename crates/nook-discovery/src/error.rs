//! Discovery error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering components and fixtures.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A configured component path does not exist.
    #[error("Component path not found: {}\n\nHint: Check the 'componentPaths' field in your config", .0.display())]
    ComponentPathNotFound(PathBuf),

    /// I/O error while walking a component path.
    #[error("Failed to read {}: {source}", .path.display())]
    Walk {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`DiscoveryError`].
pub type Result<T, E = DiscoveryError> = std::result::Result<T, E>;

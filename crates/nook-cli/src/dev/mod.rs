//! Development server module.
//!
//! - Dev-server bootstrap wiring compiler and middleware
//! - Hot reload via Server-Sent Events
//! - In-memory bundle cache
//! - File watching with debouncing

pub mod server;
pub mod state;
pub mod watcher;

pub use server::{build_app, DefaultMiddlewareFactory, DevServer, MiddlewareFactory};
pub use state::{BuildStatus, BundleCache, DevServerState, SharedState};
pub use watcher::{FileChange, FileWatcher};

use serde::{Deserialize, Serialize};

/// Events in the dev server lifecycle, broadcast to SSE clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DevEvent {
    /// Build started
    BuildStarted,

    /// Build completed successfully
    BuildCompleted { duration_ms: u64 },

    /// Build failed with error
    BuildFailed { error: String },

    /// Client connected
    ClientConnected { id: usize },
}

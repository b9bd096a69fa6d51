//! Shared state for the development server.
//!
//! Thread-safe access to the compiled bundle, fixture listing, build status
//! and SSE client connections, using parking_lot RwLock.

use nook_discovery::FixtureMapping;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Build status tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// No build has been performed yet
    NotStarted,
    /// Build is currently in progress
    InProgress { started_at: Instant },
    /// Build completed successfully
    Success { duration_ms: u64 },
    /// Build failed with error
    Failed { error: String },
}

impl BuildStatus {
    /// Check if build is currently running.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, BuildStatus::InProgress { .. })
    }

    /// Check if last build succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success { .. })
    }

    /// Get error message if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            BuildStatus::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// In-memory bundle cache for serving without disk I/O.
///
/// Maps URL paths to compiled content and its MIME type.
#[derive(Debug, Clone, Default)]
pub struct BundleCache {
    files: HashMap<String, (Vec<u8>, String)>,
}

impl BundleCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file under a URL path (e.g. `/__nook_modules__.js`).
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) {
        self.files.insert(path.into(), (content, content_type.into()));
    }

    /// Get a file from the cache.
    pub fn get(&self, path: &str) -> Option<&(Vec<u8>, String)> {
        self.files.get(path)
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Client connection tracker for Server-Sent Events.
pub type ClientRegistry = RwLock<HashMap<usize, tokio::sync::mpsc::Sender<String>>>;

/// Shared development server state.
pub struct DevServerState {
    /// Current build status
    pub status: RwLock<BuildStatus>,
    /// In-memory bundle cache
    pub cache: RwLock<BundleCache>,
    /// Latest discovered fixture mapping, served by the query endpoint
    pub fixtures: RwLock<FixtureMapping>,
    /// Connected SSE clients
    clients: ClientRegistry,
    /// Next client ID
    next_client_id: RwLock<usize>,
    /// Whether hot reload is wired up
    pub hot: bool,
}

impl DevServerState {
    /// Create new dev server state.
    pub fn new(hot: bool) -> Self {
        Self {
            status: RwLock::new(BuildStatus::NotStarted),
            cache: RwLock::new(BundleCache::new()),
            fixtures: RwLock::new(FixtureMapping::new()),
            clients: RwLock::new(HashMap::new()),
            next_client_id: RwLock::new(0),
            hot,
        }
    }

    /// Update build status to in-progress.
    pub fn start_build(&self) {
        *self.status.write() = BuildStatus::InProgress {
            started_at: Instant::now(),
        };
    }

    /// Update build status to success.
    pub fn complete_build(&self, duration_ms: u64) {
        *self.status.write() = BuildStatus::Success { duration_ms };
    }

    /// Update build status to failed.
    pub fn fail_build(&self, error: String) {
        *self.status.write() = BuildStatus::Failed { error };
    }

    /// Get current build status.
    pub fn get_status(&self) -> BuildStatus {
        self.status.read().clone()
    }

    /// Replace the bundle cache.
    pub fn update_cache(&self, new_cache: BundleCache) {
        *self.cache.write() = new_cache;
    }

    /// Get a file from the cache.
    pub fn get_cached_file(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.cache.read().get(path).cloned()
    }

    /// Replace the fixture mapping.
    pub fn update_fixtures(&self, fixtures: FixtureMapping) {
        *self.fixtures.write() = fixtures;
    }

    /// Snapshot of the current fixture mapping.
    pub fn fixtures(&self) -> FixtureMapping {
        self.fixtures.read().clone()
    }

    /// Register a new SSE client, returning its id and event receiver.
    pub fn register_client(&self) -> (usize, tokio::sync::mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_client_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = tokio::sync::mpsc::channel(100);
        self.clients.write().insert(id, tx);

        (id, rx)
    }

    /// Unregister an SSE client.
    pub fn unregister_client(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Broadcast an event to all connected clients.
    ///
    /// Disconnected clients are dropped from the registry.
    pub async fn broadcast(&self, event: &crate::dev::DevEvent) {
        let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());

        let clients = self.clients.read().clone();
        let mut failed_ids = Vec::new();

        for (id, tx) in clients {
            if tx.send(json.clone()).await.is_err() {
                failed_ids.push(id);
            }
        }

        for id in failed_ids {
            self.unregister_client(id);
        }
    }

    /// Get number of connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<DevServerState>;

#[cfg(test)]
mod tests {
    use super::*;
    use nook_discovery::{ComponentRef, FixtureFile};
    use std::path::PathBuf;

    #[test]
    fn test_build_status_lifecycle() {
        let state = DevServerState::new(true);
        assert!(matches!(state.get_status(), BuildStatus::NotStarted));

        state.start_build();
        assert!(state.get_status().is_in_progress());

        state.complete_build(150);
        assert!(state.get_status().is_success());

        state.fail_build("boom".to_string());
        assert_eq!(state.get_status().error(), Some("boom"));
    }

    #[test]
    fn test_bundle_cache_operations() {
        let mut cache = BundleCache::new();
        assert!(cache.is_empty());

        cache.insert(
            "/__nook_modules__.js",
            b"module.exports = {}".to_vec(),
            "application/javascript",
        );
        assert_eq!(cache.len(), 1);

        let (content, content_type) = cache.get("/__nook_modules__.js").unwrap();
        assert_eq!(content, b"module.exports = {}");
        assert_eq!(content_type, "application/javascript");
    }

    #[test]
    fn test_fixture_snapshot_replaced() {
        let state = DevServerState::new(true);
        assert!(state.fixtures().is_empty());

        state.update_fixtures(FixtureMapping::from(vec![FixtureFile {
            file_path: PathBuf::from("/c/__fixtures__/Foo/blank.js"),
            components: vec![ComponentRef {
                file_path: PathBuf::from("/c/Foo.js"),
                name: "Foo".to_string(),
            }],
        }]));

        assert_eq!(state.fixtures().len(), 1);
    }

    #[tokio::test]
    async fn test_client_registration_and_broadcast() {
        let state = Arc::new(DevServerState::new(true));

        let (id1, mut rx1) = state.register_client();
        let (id2, _rx2) = state.register_client();
        assert_ne!(id1, id2);
        assert_eq!(state.client_count(), 2);

        state
            .broadcast(&crate::dev::DevEvent::BuildCompleted { duration_ms: 42 })
            .await;

        let payload = rx1.recv().await.unwrap();
        assert!(payload.contains("BuildCompleted"));
        assert!(payload.contains("42"));

        state.unregister_client(id1);
        assert_eq!(state.client_count(), 1);
    }

    #[tokio::test]
    async fn test_broadcast_drops_disconnected_clients() {
        let state = Arc::new(DevServerState::new(true));

        let (_id, rx) = state.register_client();
        drop(rx);

        state.broadcast(&crate::dev::DevEvent::BuildStarted).await;
        assert_eq!(state.client_count(), 0);
    }
}

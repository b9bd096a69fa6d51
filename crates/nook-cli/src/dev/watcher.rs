//! File system watcher with debouncing for development mode.
//!
//! Watches the configured component paths and filters changes to relevant
//! files, ignoring node_modules, hidden files, and other configured
//! patterns.

use crate::error::{CliError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone)]
pub enum FileChange {
    /// File was modified
    Modified(PathBuf),
    /// File was created
    Created(PathBuf),
    /// File was removed
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// File watcher with debouncing and filtering.
///
/// Watches each component path recursively and sends change events through
/// a channel. Debouncing prevents rapid successive events from causing
/// multiple rebuilds.
pub struct FileWatcher {
    /// Underlying notify watcher
    _watcher: RecommendedWatcher,
    /// Directories being watched
    roots: Vec<PathBuf>,
}

impl FileWatcher {
    /// Create a new file watcher over the given directories.
    ///
    /// # Arguments
    ///
    /// * `roots` - Directories to watch recursively
    /// * `ignore_patterns` - Patterns to ignore (glob-style)
    /// * `debounce_ms` - Debounce delay in milliseconds
    ///
    /// # Returns
    ///
    /// Tuple of (FileWatcher, receiver for change events)
    ///
    /// # Errors
    ///
    /// Returns error if the watcher cannot be created or a directory
    /// doesn't exist
    pub fn new(
        roots: Vec<PathBuf>,
        ignore_patterns: Vec<String>,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        for root in &roots {
            if !root.exists() {
                return Err(CliError::FileNotFound(root.clone()));
            }
        }

        let (tx, rx) = mpsc::channel(100);

        let debounce_duration = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(PathBuf, Instant)> = None;
        let roots_clone = roots.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                for path in &event.paths {
                    if Self::should_ignore(path, &roots_clone, &ignore_patterns) {
                        continue;
                    }

                    // Debounce: skip if same file changed within the window
                    let now = Instant::now();
                    if let Some((last_path, last_time)) = &last_event {
                        if last_path == path && now.duration_since(*last_time) < debounce_duration
                        {
                            continue;
                        }
                    }

                    last_event = Some((path.clone(), now));

                    let change = match event.kind {
                        notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                        notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                        notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                        _ => continue,
                    };

                    let _ = tx.blocking_send(change);
                }
            }
        })
        .map_err(CliError::Watch)?;

        for root in &roots {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .map_err(CliError::Watch)?;
        }

        Ok((
            Self {
                _watcher: watcher,
                roots,
            },
            rx,
        ))
    }

    /// Check if a path should be ignored.
    ///
    /// Only paths under one of the watched directories pass; everything
    /// else is dropped.
    fn should_ignore(path: &Path, roots: &[PathBuf], ignore_patterns: &[String]) -> bool {
        let rel_path = match roots
            .iter()
            .find_map(|root| path.strip_prefix(root).ok())
        {
            Some(p) => p,
            None => return true,
        };

        let path_str = rel_path.to_string_lossy();

        for pattern in ignore_patterns {
            if pattern.starts_with('*') {
                // Extension pattern like "*.log"
                let ext = pattern.trim_start_matches('*');
                if path_str.ends_with(ext) {
                    return true;
                }
            } else if path_str.starts_with(pattern) || path_str.contains(&format!("/{}", pattern))
            {
                // Directory pattern like "node_modules"
                return true;
            }
        }

        // Ignore hidden files and directories
        for component in rel_path.components() {
            if let Some(name) = component.as_os_str().to_str() {
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        false
    }

    /// Get the directories being watched.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_ignore_node_modules() {
        let roots = vec![PathBuf::from("/project/src/components")];
        let patterns = vec!["node_modules".to_string()];

        let path = PathBuf::from("/project/src/components/node_modules/pkg/index.js");
        assert!(FileWatcher::should_ignore(&path, &roots, &patterns));

        let path = PathBuf::from("/project/src/components/Button.jsx");
        assert!(!FileWatcher::should_ignore(&path, &roots, &patterns));
    }

    #[test]
    fn test_should_ignore_extension() {
        let roots = vec![PathBuf::from("/project/src/components")];
        let patterns = vec!["*.log".to_string()];

        let path = PathBuf::from("/project/src/components/debug.log");
        assert!(FileWatcher::should_ignore(&path, &roots, &patterns));

        let path = PathBuf::from("/project/src/components/Button.js");
        assert!(!FileWatcher::should_ignore(&path, &roots, &patterns));
    }

    #[test]
    fn test_should_ignore_hidden_files() {
        let roots = vec![PathBuf::from("/project/src/components")];
        let patterns = vec![];

        let path = PathBuf::from("/project/src/components/.DS_Store");
        assert!(FileWatcher::should_ignore(&path, &roots, &patterns));

        let path = PathBuf::from("/project/src/components/.cache/file.js");
        assert!(FileWatcher::should_ignore(&path, &roots, &patterns));
    }

    #[test]
    fn test_should_ignore_outside_watched_dirs() {
        let roots = vec![
            PathBuf::from("/project/src/components"),
            PathBuf::from("/project/lib/widgets"),
        ];
        let patterns = vec![];

        let path = PathBuf::from("/other/file.js");
        assert!(FileWatcher::should_ignore(&path, &roots, &patterns));

        let path = PathBuf::from("/project/lib/widgets/__fixtures__/Widget/blank.js");
        assert!(!FileWatcher::should_ignore(&path, &roots, &patterns));
    }

    #[test]
    fn test_file_change_path() {
        let path = PathBuf::from("/project/src/components/Button.jsx");

        let change = FileChange::Modified(path.clone());
        assert_eq!(change.path(), path.as_path());

        let change = FileChange::Created(path.clone());
        assert_eq!(change.path(), path.as_path());

        let change = FileChange::Removed(path.clone());
        assert_eq!(change.path(), path.as_path());
    }
}

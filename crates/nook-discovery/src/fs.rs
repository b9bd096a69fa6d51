//! Filesystem-backed fixture discovery.
//!
//! Scans configured component paths for component modules and their
//! `__fixtures__` directories. Layout convention:
//!
//! ```text
//! components/
//!   Button.jsx
//!   Card.js
//!   __fixtures__/
//!     Button/
//!       default.js
//!       disabled.json
//!     Card/
//!       blank.jsx
//! ```

use crate::error::{DiscoveryError, Result};
use crate::model::{ComponentMapping, ComponentRef, DiscoveryOutput, FixtureFile, FixtureMapping};
use crate::FixtureDiscovery;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directory name holding fixture files for the sibling components.
pub const FIXTURE_DIR_NAME: &str = "__fixtures__";

const COMPONENT_EXTENSIONS: &[&str] = &["js", "jsx"];
const FIXTURE_EXTENSIONS: &[&str] = &["js", "jsx", "json"];

/// Discovery over the local filesystem.
pub struct FsFixtureDiscovery {
    component_paths: Vec<PathBuf>,
}

impl FsFixtureDiscovery {
    /// Create a discovery over the given component search paths.
    pub fn new(component_paths: Vec<PathBuf>) -> Self {
        Self { component_paths }
    }

    /// Collect component modules beneath `root`, skipping fixture dirs.
    ///
    /// Components are keyed by file stem; nested directories are searched
    /// so `components/forms/Input.jsx` registers as `Input`.
    fn scan_components(&self, root: &Path, components: &mut ComponentMapping) -> Result<()> {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != FIXTURE_DIR_NAME);

        for entry in walker {
            let entry = entry.map_err(|e| DiscoveryError::Walk {
                path: root.to_path_buf(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !has_extension(path, COMPONENT_EXTENSIONS) {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            debug!(component = name, path = %path.display(), "discovered component");
            components.insert(name, path);
        }

        Ok(())
    }

    /// Collect fixture files for known components beneath `root`.
    ///
    /// Fixture directories are named after the component they exercise; a
    /// directory with no matching component is skipped with a warning.
    fn scan_fixtures(
        &self,
        root: &Path,
        components: &ComponentMapping,
        fixtures: &mut Vec<FixtureFile>,
    ) -> Result<()> {
        for fixture_root in find_fixture_roots(root) {
            let walker = WalkDir::new(&fixture_root)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();

            for entry in walker {
                let entry = entry.map_err(|e| DiscoveryError::Walk {
                    path: fixture_root.clone(),
                    source: e.into(),
                })?;

                if !entry.file_type().is_dir() {
                    continue;
                }

                let Some(name) = entry.file_name().to_str() else {
                    continue;
                };
                let Some(component_path) = components.get(name) else {
                    warn!(
                        dir = %entry.path().display(),
                        "fixture directory does not match any component, skipping"
                    );
                    continue;
                };

                let component = ComponentRef {
                    file_path: component_path.to_path_buf(),
                    name: name.to_string(),
                };
                self.scan_fixture_dir(entry.path(), &component, fixtures)?;
            }
        }

        Ok(())
    }

    /// Collect the fixture files directly inside one component's fixture dir.
    fn scan_fixture_dir(
        &self,
        dir: &Path,
        component: &ComponentRef,
        fixtures: &mut Vec<FixtureFile>,
    ) -> Result<()> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| DiscoveryError::Walk {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if !has_extension(entry.path(), FIXTURE_EXTENSIONS) {
                continue;
            }

            fixtures.push(FixtureFile {
                file_path: entry.path().to_path_buf(),
                components: vec![component.clone()],
            });
        }

        Ok(())
    }
}

impl FixtureDiscovery for FsFixtureDiscovery {
    fn discover(&self) -> Result<DiscoveryOutput> {
        let mut components = ComponentMapping::new();
        let mut fixtures = Vec::new();

        for root in &self.component_paths {
            if !root.is_dir() {
                return Err(DiscoveryError::ComponentPathNotFound(root.clone()));
            }
            self.scan_components(root, &mut components)?;
        }

        // Second pass: fixture directories reference components that may
        // live under a different search path.
        for root in &self.component_paths {
            self.scan_fixtures(root, &components, &mut fixtures)?;
        }

        debug!(
            components = components.len(),
            fixtures = fixtures.len(),
            "discovery complete"
        );

        Ok(DiscoveryOutput {
            components,
            fixtures: FixtureMapping::from(fixtures),
        })
    }
}

/// Find `__fixtures__` directories beneath a component path.
fn find_fixture_roots(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == FIXTURE_DIR_NAME)
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

//! Data model for discovered components and fixtures.
//!
//! All types serialize with camelCase field names so the generated entry
//! module and the fixture-query endpoint share one wire shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Reference to a component exercised by a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRef {
    /// Source file of the component
    pub file_path: PathBuf,
    /// Component name
    pub name: String,
}

/// A fixture file and the component(s) it exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureFile {
    /// Path of the fixture file itself
    pub file_path: PathBuf,
    /// Components rendered by this fixture
    pub components: Vec<ComponentRef>,
}

impl FixtureFile {
    /// Directory containing this fixture file.
    pub fn dir(&self) -> Option<&Path> {
        self.file_path.parent()
    }
}

/// Ordered sequence of fixture files.
///
/// Order is meaningful: it is preserved through the embedding transform.
/// Fixture paths are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureMapping(Vec<FixtureFile>);

impl FixtureMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fixture file, preserving insertion order.
    pub fn push(&mut self, fixture: FixtureFile) {
        self.0.push(fixture);
    }

    /// Iterate fixture files in input order.
    pub fn iter(&self) -> impl Iterator<Item = &FixtureFile> {
        self.0.iter()
    }

    /// Number of fixture files.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping holds no fixtures.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct fixture directories, ordered by first appearance.
    pub fn distinct_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for fixture in &self.0 {
            if let Some(dir) = fixture.dir() {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        dirs
    }
}

impl From<Vec<FixtureFile>> for FixtureMapping {
    fn from(fixtures: Vec<FixtureFile>) -> Self {
        Self(fixtures)
    }
}

impl<'a> IntoIterator for &'a FixtureMapping {
    type Item = &'a FixtureFile;
    type IntoIter = std::slice::Iter<'a, FixtureFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Mapping from component name to its source file path.
///
/// Legacy access path kept for consumers that key off component names
/// instead of fixture files. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentMapping(IndexMap<String, PathBuf>);

impl ComponentMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component source file under a name.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.0.insert(name.into(), path.into());
    }

    /// Look up a component path by name.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.0.get(name).map(PathBuf::as_path)
    }

    /// Iterate (name, path) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no components are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a discovery pass: components plus the fixtures exercising them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryOutput {
    /// Component name to source file
    pub components: ComponentMapping,
    /// Fixture files in discovery order
    pub fixtures: FixtureMapping,
}

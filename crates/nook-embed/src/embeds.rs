//! Structured code generation for the entry-module placeholders.

use nook_discovery::{ComponentMapping, FixtureMapping};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension filter applied by context loader expressions.
///
/// Matches component-file extensions (`.js` / `.jsx`), written as a
/// JavaScript regex literal.
const CONTEXT_EXTENSION_FILTER: &str = r"/\.jsx?$/";

/// Build-system side channel for reporting watched directories.
///
/// Each distinct fixture directory is reported exactly once per transform,
/// which lets the host build re-run the transform when files are added to
/// or removed from a watched directory. Direct file imports cannot express
/// that.
pub trait DependencyTracker {
    /// Register a directory as a dependency of the generated module.
    fn add_dependency(&mut self, dir: &Path);
}

impl DependencyTracker for Vec<PathBuf> {
    fn add_dependency(&mut self, dir: &Path) {
        self.push(dir.to_path_buf());
    }
}

/// Tracker that discards registrations.
impl DependencyTracker for () {
    fn add_dependency(&mut self, _dir: &Path) {}
}

/// Rendered expression text for each entry-module placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEmbeds {
    /// Object literal mapping fixture file path to its module
    pub fixture_modules: String,
    /// The fixture mapping serialized as a JSON array literal
    pub fixture_files: String,
    /// Object literal mapping distinct component file path to its module
    pub deprecated_component_modules: String,
    /// Module expression for the proxies module, or a neutral value
    pub proxies: String,
    /// Array literal of context loader expressions, one per fixture dir
    pub contexts: String,
}

impl ModuleEmbeds {
    /// Compute embeds from a discovered mapping.
    ///
    /// Reports every distinct fixture directory to `tracker`, once per
    /// directory regardless of how many fixtures live there.
    pub fn build(
        fixtures: &FixtureMapping,
        components: &ComponentMapping,
        proxies_path: Option<&Path>,
        tracker: &mut dyn DependencyTracker,
    ) -> Self {
        let fixture_dirs = fixtures.distinct_dirs();
        for dir in &fixture_dirs {
            tracker.add_dependency(dir);
        }
        debug!(
            fixtures = fixtures.len(),
            dirs = fixture_dirs.len(),
            "building module embeds"
        );

        Self {
            fixture_modules: fixture_modules_literal(fixtures),
            fixture_files: fixture_files_literal(fixtures),
            deprecated_component_modules: component_modules_literal(fixtures, components),
            proxies: proxies_expr(proxies_path),
            contexts: contexts_literal(&fixture_dirs),
        }
    }
}

/// `require('<path>')`
fn require_expr(path: &Path) -> String {
    format!("require('{}')", js_path(path))
}

/// `require.context('<dir>',false,/\.jsx?$/)`: non-recursive, filtered to
/// component-file extensions.
fn context_expr(dir: &Path) -> String {
    format!(
        "require.context('{}',false,{})",
        js_path(dir),
        CONTEXT_EXTENSION_FILTER
    )
}

/// Object literal keyed by fixture file path, input order preserved.
/// Keys are unique by construction (fixture paths are unique).
fn fixture_modules_literal(fixtures: &FixtureMapping) -> String {
    let entries: Vec<String> = fixtures
        .iter()
        .map(|f| format!("'{}':{}", js_path(&f.file_path), require_expr(&f.file_path)))
        .collect();
    format!("{{{}}}", entries.join(","))
}

/// The fixture mapping as a literal data structure (JSON array of
/// `{filePath, components}`), input order preserved.
fn fixture_files_literal(fixtures: &FixtureMapping) -> String {
    // FixtureMapping serializes transparently as an ordered array.
    serde_json::to_string(fixtures).unwrap_or_else(|_| "[]".to_string())
}

/// Object literal keyed by distinct component file path.
///
/// Multiple fixtures referencing the same component contribute a single
/// entry; paths keep first-appearance order. Components from the legacy
/// name mapping that no fixture references are still included so consumers
/// of the legacy path see every discovered component.
fn component_modules_literal(fixtures: &FixtureMapping, components: &ComponentMapping) -> String {
    let mut seen: Vec<&Path> = Vec::new();
    for fixture in fixtures {
        for component in &fixture.components {
            let path = component.file_path.as_path();
            if !seen.contains(&path) {
                seen.push(path);
            }
        }
    }
    for (_, path) in components.iter() {
        if !seen.contains(&path) {
            seen.push(path);
        }
    }

    let entries: Vec<String> = seen
        .iter()
        .map(|p| format!("'{}':{}", js_path(p), require_expr(p)))
        .collect();
    format!("{{{}}}", entries.join(","))
}

/// Module expression for the configured proxies module, `[]` when unset.
fn proxies_expr(proxies_path: Option<&Path>) -> String {
    match proxies_path {
        Some(path) => require_expr(path),
        None => "[]".to_string(),
    }
}

/// Array literal with one context loader per distinct fixture directory.
fn contexts_literal(fixture_dirs: &[&Path]) -> String {
    let entries: Vec<String> = fixture_dirs.iter().map(|d| context_expr(d)).collect();
    format!("[{}]", entries.join(","))
}

/// Render a path as a single-quoted JavaScript string body.
fn js_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nook_discovery::{ComponentRef, FixtureFile};
    use std::path::PathBuf;

    fn strip_ws(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn fixture(path: &str, name: &str, component_path: &str) -> FixtureFile {
        FixtureFile {
            file_path: PathBuf::from(path),
            components: vec![ComponentRef {
                file_path: PathBuf::from(component_path),
                name: name.to_string(),
            }],
        }
    }

    /// Foo with one fixture, Bar with two fixtures in the same directory.
    fn sample() -> (FixtureMapping, ComponentMapping) {
        let fixtures = FixtureMapping::from(vec![
            fixture("/components/__fixtures__/Foo/blank.js", "Foo", "/components/Foo.js"),
            fixture("/components/__fixtures__/Bar/one.js", "Bar", "/components/Bar.js"),
            fixture("/components/__fixtures__/Bar/two.json", "Bar", "/components/Bar.js"),
        ]);
        let mut components = ComponentMapping::new();
        components.insert("Foo", "/components/Foo.js");
        components.insert("Bar", "/components/Bar.js");
        (fixtures, components)
    }

    #[test]
    fn test_fixture_modules_entries_in_input_order() {
        let (fixtures, components) = sample();
        let embeds = ModuleEmbeds::build(&fixtures, &components, None, &mut ());

        let expected = "{
            '/components/__fixtures__/Foo/blank.js':require('/components/__fixtures__/Foo/blank.js'),
            '/components/__fixtures__/Bar/one.js':require('/components/__fixtures__/Bar/one.js'),
            '/components/__fixtures__/Bar/two.json':require('/components/__fixtures__/Bar/two.json')
        }";
        assert_eq!(strip_ws(&embeds.fixture_modules), strip_ws(expected));
    }

    #[test]
    fn test_fixture_files_is_parseable_json_in_input_order() {
        let (fixtures, components) = sample();
        let embeds = ModuleEmbeds::build(&fixtures, &components, None, &mut ());

        let parsed: serde_json::Value = serde_json::from_str(&embeds.fixture_files).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {
                    "filePath": "/components/__fixtures__/Foo/blank.js",
                    "components": [{ "filePath": "/components/Foo.js", "name": "Foo" }]
                },
                {
                    "filePath": "/components/__fixtures__/Bar/one.js",
                    "components": [{ "filePath": "/components/Bar.js", "name": "Bar" }]
                },
                {
                    "filePath": "/components/__fixtures__/Bar/two.json",
                    "components": [{ "filePath": "/components/Bar.js", "name": "Bar" }]
                }
            ])
        );
    }

    #[test]
    fn test_deprecated_component_modules_dedupes() {
        let (fixtures, components) = sample();
        let embeds = ModuleEmbeds::build(&fixtures, &components, None, &mut ());

        // Bar appears in two fixtures but must contribute one entry.
        let expected = "{
            '/components/Foo.js':require('/components/Foo.js'),
            '/components/Bar.js':require('/components/Bar.js')
        }";
        assert_eq!(
            strip_ws(&embeds.deprecated_component_modules),
            strip_ws(expected)
        );
    }

    #[test]
    fn test_contexts_one_per_distinct_directory() {
        let (fixtures, components) = sample();
        let embeds = ModuleEmbeds::build(&fixtures, &components, None, &mut ());

        let expected = r"[
            require.context('/components/__fixtures__/Foo',false,/\.jsx?$/),
            require.context('/components/__fixtures__/Bar',false,/\.jsx?$/)
        ]";
        assert_eq!(strip_ws(&embeds.contexts), strip_ws(expected));
    }

    #[test]
    fn test_dependency_registered_once_per_directory() {
        let (fixtures, components) = sample();
        let mut deps: Vec<PathBuf> = Vec::new();
        ModuleEmbeds::build(&fixtures, &components, None, &mut deps);

        // Three fixtures across two directories: exactly two registrations.
        assert_eq!(
            deps,
            vec![
                PathBuf::from("/components/__fixtures__/Foo"),
                PathBuf::from("/components/__fixtures__/Bar")
            ]
        );
    }

    #[test]
    fn test_proxies_neutral_when_unconfigured() {
        let (fixtures, components) = sample();
        let embeds = ModuleEmbeds::build(&fixtures, &components, None, &mut ());
        assert_eq!(embeds.proxies, "[]");
    }

    #[test]
    fn test_proxies_single_module_expression_when_configured() {
        let (fixtures, components) = sample();
        let proxies = PathBuf::from("/project/nook.proxies.js");
        let embeds = ModuleEmbeds::build(&fixtures, &components, Some(&proxies), &mut ());
        assert_eq!(embeds.proxies, "require('/project/nook.proxies.js')");
    }

    #[test]
    fn test_empty_mapping_produces_empty_literals() {
        let fixtures = FixtureMapping::new();
        let components = ComponentMapping::new();
        let mut deps: Vec<PathBuf> = Vec::new();
        let embeds = ModuleEmbeds::build(&fixtures, &components, None, &mut deps);

        assert_eq!(embeds.fixture_modules, "{}");
        assert_eq!(embeds.fixture_files, "[]");
        assert_eq!(embeds.deprecated_component_modules, "{}");
        assert_eq!(embeds.contexts, "[]");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_js_path_escapes_quotes() {
        assert_eq!(js_path(Path::new("/a/it's.js")), "/a/it\\'s.js");
    }
}

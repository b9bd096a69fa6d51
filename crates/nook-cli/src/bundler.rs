//! Compiler construction for the dev server.
//!
//! The bootstrap never talks to a concrete bundler; it goes through the
//! [`BundlerFactory`] / [`Compiler`] boundaries so tests can substitute
//! recording doubles. The production [`EmbedCompiler`] runs fixture
//! discovery and the module-embedding transform to produce the in-memory
//! bundle the dev middleware serves.

use crate::dev::BundleCache;
use crate::error::Result;
use nook_config::ServerConfig;
use nook_discovery::{FixtureDiscovery, FixtureMapping, FsFixtureDiscovery};
use nook_embed::{embed_modules, ModuleEmbeds, USER_MODULES_TEMPLATE};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// URL path of the generated fixture entry bundle.
pub const MODULES_BUNDLE_PATH: &str = "/__nook_modules__.js";

/// Result of one compilation pass.
#[derive(Debug)]
pub struct CompileOutput {
    /// Compiled files keyed by URL path
    pub cache: BundleCache,
    /// Fixture mapping backing the query endpoint
    pub fixtures: FixtureMapping,
    /// Fixture directories the build depends on, one entry per distinct
    /// directory
    pub watched_dirs: Vec<PathBuf>,
}

/// Produces the served bundle.
pub trait Compiler: Send + Sync {
    /// Run discovery and compile the fixture entry bundle.
    fn compile(&self) -> Result<CompileOutput>;
}

/// Constructs a [`Compiler`] from the server configuration.
pub trait BundlerFactory {
    /// Create the compiler instance for this configuration.
    fn create_compiler(&self, config: &ServerConfig) -> Result<Arc<dyn Compiler>>;
}

/// Compiler backed by fixture discovery and the embedding transform.
pub struct EmbedCompiler {
    discovery: Arc<dyn FixtureDiscovery>,
    global_imports: Vec<String>,
    proxies_path: Option<PathBuf>,
}

impl EmbedCompiler {
    /// Create a compiler over a discovery implementation.
    pub fn new(
        discovery: Arc<dyn FixtureDiscovery>,
        global_imports: Vec<String>,
        proxies_path: Option<PathBuf>,
    ) -> Self {
        Self {
            discovery,
            global_imports,
            proxies_path,
        }
    }

    /// Render the entry module: global imports first, then the rewritten
    /// user-modules template.
    fn render_entry(&self, embeds: &ModuleEmbeds) -> String {
        let mut source = String::new();
        for import in &self.global_imports {
            source.push_str("require('");
            source.push_str(import);
            source.push_str("');\n");
        }
        source.push_str(&embed_modules(USER_MODULES_TEMPLATE, embeds));
        source
    }
}

impl Compiler for EmbedCompiler {
    fn compile(&self) -> Result<CompileOutput> {
        let output = self.discovery.discover()?;

        let mut watched_dirs: Vec<PathBuf> = Vec::new();
        let embeds = ModuleEmbeds::build(
            &output.fixtures,
            &output.components,
            self.proxies_path.as_deref(),
            &mut watched_dirs,
        );

        let entry = self.render_entry(&embeds);
        debug!(
            fixtures = output.fixtures.len(),
            bytes = entry.len(),
            "compiled fixture entry bundle"
        );

        let mut cache = BundleCache::new();
        cache.insert(
            MODULES_BUNDLE_PATH,
            entry.into_bytes(),
            "application/javascript",
        );

        Ok(CompileOutput {
            cache,
            fixtures: output.fixtures,
            watched_dirs,
        })
    }
}

/// Production factory: filesystem discovery per the configured paths.
pub struct EmbedBundlerFactory;

impl BundlerFactory for EmbedBundlerFactory {
    fn create_compiler(&self, config: &ServerConfig) -> Result<Arc<dyn Compiler>> {
        let discovery = FsFixtureDiscovery::new(config.resolved_component_paths());
        Ok(Arc::new(EmbedCompiler::new(
            Arc::new(discovery),
            config.global_imports.clone(),
            config.resolved_proxies_path(),
        )))
    }
}

//! Configuration loading for the nook fixture explorer.
//!
//! The server configuration is an immutable snapshot loaded once at
//! startup. Sources merge in priority order: defaults, then
//! `nook.config.json` in the project root, then `NOOK_*` environment
//! variables. CLI flags are merged on top by the CLI crate.

mod error;
mod provider;
mod settings;

pub use error::{ConfigError, Result};
pub use provider::FileConfigProvider;
pub use settings::ServerConfig;

/// Source of the server configuration.
///
/// Exists so the dev-server bootstrap can be exercised against an in-memory
/// configuration in tests; [`FileConfigProvider`] is the production
/// implementation.
pub trait ConfigProvider {
    /// Produce the configuration snapshot.
    fn server_config(&self) -> Result<ServerConfig>;
}

impl ConfigProvider for ServerConfig {
    fn server_config(&self) -> Result<ServerConfig> {
        Ok(self.clone())
    }
}

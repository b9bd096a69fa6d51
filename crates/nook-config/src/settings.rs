//! Server configuration snapshot.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Immutable dev-server configuration.
///
/// Loaded once at startup, never mutated. Field names follow the
/// `nook.config.json` wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Project root; relative paths resolve against it
    pub root_path: PathBuf,
    /// Port the dev server listens on
    pub port: u16,
    /// Hostname the dev server binds to
    pub hostname: String,
    /// Whether hot reload is wired up
    pub hot: bool,
    /// Modules loaded before any fixture (polyfills, global CSS)
    pub global_imports: Vec<String>,
    /// Directories searched for components and fixtures
    pub component_paths: Vec<PathBuf>,
    /// Optional proxy module wrapped around every rendered fixture
    pub proxies_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            port: 8989,
            hostname: "localhost".to_string(),
            hot: true,
            global_imports: Vec::new(),
            component_paths: vec![PathBuf::from("src/components")],
            proxies_path: None,
        }
    }
}

impl ServerConfig {
    /// Component paths resolved against the root path.
    pub fn resolved_component_paths(&self) -> Vec<PathBuf> {
        self.component_paths
            .iter()
            .map(|p| self.resolve(p))
            .collect()
    }

    /// Proxies path resolved against the root path, if configured.
    pub fn resolved_proxies_path(&self) -> Option<PathBuf> {
        self.proxies_path.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_path.join(path)
        }
    }

    /// Validate the snapshot against the filesystem.
    ///
    /// Absence of anything named here terminates startup; there is no
    /// partial-success mode.
    pub fn validate(&self) -> Result<()> {
        if !self.root_path.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "rootPath".to_string(),
                value: self.root_path.display().to_string(),
                hint: "Root path must be an existing directory".to_string(),
            });
        }

        for path in self.resolved_component_paths() {
            if !path.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "componentPaths".to_string(),
                    value: path.display().to_string(),
                    hint: "Every component path must be an existing directory".to_string(),
                });
            }
        }

        if let Some(proxies) = self.resolved_proxies_path() {
            if !proxies.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "proxiesPath".to_string(),
                    value: proxies.display().to_string(),
                    hint: "Proxies path must point to an existing module file".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Address string the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// URL the server is reachable at.
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

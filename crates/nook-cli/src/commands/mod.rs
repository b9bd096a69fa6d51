//! Command implementations for the nook CLI.

pub mod check;
pub mod dev;
pub mod list;

use crate::cli::ProjectArgs;
use crate::error::Result;
use nook_config::{ConfigProvider, FileConfigProvider, ServerConfig};

/// Load the server configuration for a command.
///
/// Resolves the config file under the project root (or an explicit
/// `--config` path) and layers environment overrides on top.
pub fn load_config(project: &ProjectArgs) -> Result<ServerConfig> {
    let mut provider = FileConfigProvider::new(project.root.clone());
    if let Some(path) = &project.config {
        provider = provider.with_config_path(path.clone());
    }
    Ok(provider.server_config()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let args = ProjectArgs {
            root: dir.path().to_path_buf(),
            config: None,
        };

        let config = load_config(&args).unwrap();
        assert_eq!(config.port, 8989);
        assert!(config.hot);
    }

    #[test]
    fn test_load_config_explicit_path() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"port": 7001}"#).unwrap();

        let args = ProjectArgs {
            root: dir.path().to_path_buf(),
            config: Some(config_path),
        };

        let config = load_config(&args).unwrap();
        assert_eq!(config.port, 7001);
    }

    #[test]
    fn test_load_config_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let args = ProjectArgs {
            root: dir.path().to_path_buf(),
            config: Some(dir.path().join("missing.json")),
        };

        assert!(load_config(&args).is_err());
    }
}

//! Figment-backed configuration loading.

use crate::error::{ConfigError, Result};
use crate::settings::ServerConfig;
use crate::ConfigProvider;
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use std::path::PathBuf;
use tracing::debug;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "nook.config.json";

/// Loads [`ServerConfig`] from disk and environment.
///
/// Priority: environment variables (`NOOK_PORT`, `NOOK_HOT`, ...) over
/// `nook.config.json` over built-in defaults.
pub struct FileConfigProvider {
    root: PathBuf,
    config_path: Option<PathBuf>,
}

impl FileConfigProvider {
    /// Provider for a project root, using the conventional config file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_path: None,
        }
    }

    /// Use an explicit config file instead of the conventional lookup.
    ///
    /// Unlike the conventional file, an explicit path must exist.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    fn config_file(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.config_path {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            return Ok(Some(path.clone()));
        }

        let conventional = self.root.join(CONFIG_FILE_NAME);
        Ok(conventional.is_file().then_some(conventional))
    }
}

impl ConfigProvider for FileConfigProvider {
    fn server_config(&self) -> Result<ServerConfig> {
        let defaults = ServerConfig {
            root_path: self.root.clone(),
            ..ServerConfig::default()
        };

        let mut figment = Figment::new().merge(Serialized::defaults(defaults));

        if let Some(path) = self.config_file()? {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // Env keys arrive snake_case; the config deserializes camelCase
        // wire names, so NOOK_PROXIES_PATH must become proxiesPath.
        figment = figment
            .merge(Env::prefixed("NOOK_").map(|key| camel_case_key(key.as_str()).into()));

        // A relative rootPath resolves against the process cwd, same as
        // the provider root itself.
        let config: ServerConfig = figment.extract()?;
        Ok(config)
    }
}

/// Convert a snake_case env key to the camelCase field name.
fn camel_case_key(key: &str) -> String {
    let mut parts = key.split('_');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let provider = FileConfigProvider::new(dir.path());

        let config = provider.server_config().unwrap();
        assert_eq!(config.root_path, dir.path());
        assert_eq!(config.port, 8989);
        assert!(config.hot);
    }

    #[test]
    fn test_reads_conventional_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "port": 9999, "hot": false, "componentPaths": ["ui"] }"#,
        )
        .unwrap();

        let provider = FileConfigProvider::new(dir.path());
        let config = provider.server_config().unwrap();

        assert_eq!(config.port, 9999);
        assert!(!config.hot);
        assert_eq!(config.component_paths, vec![PathBuf::from("ui")]);
        // Untouched fields keep defaults.
        assert_eq!(config.hostname, "localhost");
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{ "hostname": "0.0.0.0" }"#).unwrap();

        let provider = FileConfigProvider::new(dir.path()).with_config_path(&path);
        let config = provider.server_config().unwrap();
        assert_eq!(config.hostname, "0.0.0.0");
    }

    #[test]
    fn test_missing_explicit_config_errors() {
        let dir = TempDir::new().unwrap();
        let provider =
            FileConfigProvider::new(dir.path()).with_config_path(dir.path().join("nope.json"));

        let err = provider.server_config().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_camel_case_key_mapping() {
        assert_eq!(camel_case_key("port"), "port");
        assert_eq!(camel_case_key("proxies_path"), "proxiesPath");
        assert_eq!(camel_case_key("component_paths"), "componentPaths");
        assert_eq!(camel_case_key("global_imports"), "globalImports");
    }

    #[test]
    fn test_env_overrides_apply() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NOOK_PORT", "7777");
            jail.set_env("NOOK_HOT", "false");
            let provider = FileConfigProvider::new(jail.directory());

            let config = provider.server_config().unwrap();
            assert_eq!(config.port, 7777);
            assert!(!config.hot);
            Ok(())
        });
    }

    #[test]
    fn test_multi_word_env_overrides_apply() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NOOK_PROXIES_PATH", "nook.proxies.js");
            jail.set_env("NOOK_COMPONENT_PATHS", r#"["ui", "widgets"]"#);
            let provider = FileConfigProvider::new(jail.directory());

            let config = provider.server_config().unwrap();
            assert_eq!(config.proxies_path, Some(PathBuf::from("nook.proxies.js")));
            assert_eq!(
                config.component_paths,
                vec![PathBuf::from("ui"), PathBuf::from("widgets")]
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"{ "port": 9000 }"#)?;
            jail.set_env("NOOK_PORT", "9001");
            let provider = FileConfigProvider::new(jail.directory());

            let config = provider.server_config().unwrap();
            assert_eq!(config.port, 9001);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_json_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let provider = FileConfigProvider::new(dir.path());
        let err = provider.server_config().unwrap_err();
        assert!(matches!(err, ConfigError::Extraction(_)));
    }
}

//! Layered store configuration.
//!
//! Settings come from an optional TOML file overlaid by `VETSTORE__*`
//! environment variables, read from the `[store]` section:
//!
//! ```toml
//! [store]
//! database_path = "/var/lib/vetstore/vets.sqlite3"
//! load_fixtures = false
//! log_level = "info"
//! log_dir = "/var/log/vetstore"
//! ```

use crate::logging::{default_log_level, normalize_level};
use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file consulted by [`StoreConfig::load`].
pub const DEFAULT_CONFIG_FILE: &str = "config/vetstore.toml";
const ENV_PREFIX: &str = "VETSTORE";
const SECTION: &str = "store";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite file; `None` selects an in-memory database.
    pub database_path: Option<PathBuf>,
    /// Load the seed fixtures after opening.
    pub load_fixtures: bool,
    pub log_level: String,
    /// Rolling log directory; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            load_fixtures: false,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Loads from [`DEFAULT_CONFIG_FILE`] (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Loads from `path` (if present) and the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Self::from_settings(&settings)
    }

    /// Parses a TOML document without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        let config = match settings.get::<StoreConfig>(SECTION) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => StoreConfig::default(),
            Err(err) => return Err(err),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(|err| ConfigError::Message(err.to_string()))?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Message(format!(
                    "store.log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use std::path::PathBuf;

    #[test]
    fn missing_section_yields_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.database_path.is_none());
        assert!(!config.load_fixtures);
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let config = StoreConfig::from_toml_str(
            r#"
            [store]
            database_path = "/tmp/vets.sqlite3"
            load_fixtures = true
            log_level = "WARN"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/tmp/vets.sqlite3"))
        );
        assert!(config.load_fixtures);
        assert_eq!(config.log_level, "WARN");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = StoreConfig::from_toml_str("[store]\nlog_level = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("unsupported log level"));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = StoreConfig::from_toml_str("[store]\nlog_dir = \"logs\"").unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.load_fixtures, StoreConfig::default().load_fixtures);
    }
}

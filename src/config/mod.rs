//! Configuration management for reqkit
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//!
//! # Environment Variables
//!
//! Any setting can be overridden with `REQKIT__<section>__<key>`, e.g.
//! `REQKIT__DATABASE__HOST=db.internal` or `REQKIT__LIMITS__MAX_BODY_BYTES=2MB`.
//! The database password is read from `REQKIT_DB_PASSWORD` (or
//! `DATABASE_PASSWORD`) only.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/reqkit.toml`.
//! This can be overridden using the `REQKIT_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{Config, DatabaseConfig, LimitsConfig};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load(None)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path, still honouring
    /// environment overrides.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load(Some(path))?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[database]\nname = \"app\"\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.database.name, "app");
        assert_eq!(config.limits.max_body_bytes, ByteSize(1_048_576));
        assert_eq!(config.limits.body_limit(), crate::json::BodyLimit::default());
    }

    #[test]
    fn test_body_limit_follows_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[limits]\nmax_body_bytes = \"2KB\"\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.limits.body_limit(), crate::json::BodyLimit(2048));
    }

    #[test]
    fn test_validation_catches_empty_driver() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[database]\ndriver = \"\"\n").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::EmptyDatabaseField { field: "driver" })
        ));
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[limits]\nmax_body_bytes = \"lots\"\n").unwrap();

        assert!(matches!(
            Config::load_from_path(config_path),
            Err(ConfigError::LoadError(_))
        ));
    }
}

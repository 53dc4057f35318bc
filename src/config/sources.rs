use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "REQKIT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/reqkit.toml";
const ENV_PREFIX: &str = "REQKIT";
const ENV_SEPARATOR: &str = "__";
const PASSWORD_ENV_VARS: [&str; 2] = ["REQKIT_DB_PASSWORD", "DATABASE_PASSWORD"];

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let _ = dotenvy::dotenv();

    let config_path = path.unwrap_or_else(default_path);
    let mut config = load_from_sources(config_path)?;
    load_secrets(&mut config);

    Ok(config)
}

fn default_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// The database password only ever comes from the environment.
fn load_secrets(config: &mut Config) {
    config.database.password = PASSWORD_ENV_VARS
        .iter()
        .find_map(|name| env::var(name).ok());
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // REQKIT__DATABASE__HOST -> database.host
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.limits.max_body_bytes.as_u64(), 1_048_576);
        assert_eq!(config.database.driver, "postgres");
        assert_eq!(config.database.port, 5432);
        assert!(config.database.password.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[limits]
max_body_bytes = "2MB"

[database]
driver = "postgresql"
host = "db.internal"
port = 6432
name = "catalog"
user = "api"
ssl_mode = "require"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.limits.max_body_bytes.as_u64(), 2 * 1024 * 1024);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6432);
        assert_eq!(
            config.database.connection_params().connection_string(),
            "postgresql://api:@db.internal:6432/catalog?sslmode=require"
        );
    }

    #[test]
    fn test_password_is_not_read_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[database]\npassword = \"leaked\"\n").unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert!(config.database.password.is_none());
    }
}

use serde::{Deserialize, Serialize};

use crate::db::ConnectionParams;
use crate::humanize::ByteSize;
use crate::json::{BodyLimit, MAX_BODY_BYTES};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: ByteSize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl LimitsConfig {
    /// Limit for `StrictJson`, to be installed with `Extension`.
    pub fn body_limit(&self) -> BodyLimit {
        BodyLimit(self.max_body_bytes.as_usize())
    }
}

fn default_max_body_bytes() -> ByteSize {
    ByteSize(MAX_BODY_BYTES as u64)
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user: String,
    /// Loaded from environment, never from the config file
    #[serde(skip)]
    pub password: Option<String>,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            host: default_host(),
            port: default_port(),
            name: String::new(),
            user: String::new(),
            password: None,
            ssl_mode: default_ssl_mode(),
        }
    }
}

impl DatabaseConfig {
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            driver: self.driver.clone(),
            host: self.host.clone(),
            port: self.port,
            name: self.name.clone(),
            user: self.user.clone(),
            password: self.password.clone().unwrap_or_default(),
            ssl_mode: self.ssl_mode.clone(),
        }
    }
}

fn default_driver() -> String {
    "postgres".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error; an unparsable one is.

use crate::api::OperatorCredentials;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_BIND: &str = "LIBRIS_BIND";
pub const ENV_DATABASE: &str = "LIBRIS_DATABASE";
pub const ENV_JWT_SECRET: &str = "LIBRIS_JWT_SECRET";
pub const ENV_OPERATOR_USERNAME: &str = "LIBRIS_OPERATOR_USERNAME";
pub const ENV_OPERATOR_PASSWORD: &str = "LIBRIS_OPERATOR_PASSWORD";
pub const ENV_TOKEN_TTL_SECS: &str = "LIBRIS_TOKEN_TTL_SECS";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_OPERATOR: &str = "zegen";
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Listen address, e.g. "0.0.0.0:8080"
    #[serde(default)]
    pub bind_addr: Option<String>,

    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[auth]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_addr: Option<String>,
    pub database_path: Option<PathBuf>,
    pub jwt_secret: Option<String>,
}

/// Fully resolved service configuration
#[derive(Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub database_path: PathBuf,
    /// `None` means no key was configured anywhere
    pub jwt_secret: Option<String>,
    pub operator: OperatorCredentials,
    pub token_ttl_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("operator", &self.operator.username)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ServiceConfig {
    /// Merge CLI, environment, TOML and compiled defaults
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let bind_addr = cli
            .bind_addr
            .clone()
            .or_else(|| env_var(ENV_BIND))
            .or_else(|| toml.bind_addr.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let database_path = cli
            .database_path
            .clone()
            .or_else(|| env_var(ENV_DATABASE).map(PathBuf::from))
            .or_else(|| toml.database_path.clone())
            .unwrap_or_else(default_database_path);

        let jwt_secret = cli
            .jwt_secret
            .clone()
            .or_else(|| env_var(ENV_JWT_SECRET))
            .or_else(|| toml.auth.jwt_secret.clone())
            .filter(|s| !s.is_empty());

        let username = env_var(ENV_OPERATOR_USERNAME)
            .or_else(|| toml.auth.username.clone())
            .unwrap_or_else(|| DEFAULT_OPERATOR.to_string());
        let password = env_var(ENV_OPERATOR_PASSWORD)
            .or_else(|| toml.auth.password.clone())
            .unwrap_or_else(|| DEFAULT_OPERATOR.to_string());

        let token_ttl_secs = match env_var(ENV_TOKEN_TTL_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                Error::Config(format!("{} must be a whole number of seconds: {}", ENV_TOKEN_TTL_SECS, e))
            })?,
            None => toml.auth.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
        };
        if token_ttl_secs == 0 {
            return Err(Error::Config("Token TTL must be greater than zero".to_string()));
        }

        let log_level = toml
            .logging
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            bind_addr,
            database_path,
            jwt_secret,
            operator: OperatorCredentials::new(username, password),
            token_ttl_secs,
            log_level,
        })
    }
}

/// Locate the TOML bootstrap file
///
/// An explicitly requested file must exist. Without one, the platform default
/// location is used when present.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        ))),
        None => Ok(default_config_path().filter(|p| p.exists())),
    }
}

/// Resolve and read the TOML bootstrap file, falling back to empty defaults
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(explicit)? {
        Some(path) => read_toml_file(&path),
        None => Ok(TomlConfig::default()),
    }
}

pub fn read_toml_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e))
    })
}

pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// `<config_dir>/libris/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("libris").join("config.toml"))
}

/// `<data_local_dir>/libris/library.db`, or `./library.db` when the platform
/// has no data directory
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("libris").join("library.db"))
        .unwrap_or_else(|| PathBuf::from("library.db"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

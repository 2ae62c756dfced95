//! Server configuration read from the environment.
//!
//! Unset or blank variables fall back to defaults; set but unparseable
//! values are errors rather than silently defaulted.

use quotebook_core::{default_log_level, open_db, open_db_in_memory, DbError};
use rusqlite::Connection;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "QUOTEBOOK_BIND_ADDR";
pub const ENV_DB_PATH: &str = "QUOTEBOOK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "QUOTEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "QUOTEBOOK_LOG_DIR";
pub const ENV_APP_VERSION: &str = "QUOTEBOOK_APP_VERSION";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "quotebook.sqlite3";
const DEFAULT_APP_VERSION: u32 = 55;
const MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} `{value}`: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    /// Opens the database and applies migrations.
    pub fn open(&self) -> Result<Connection, DbError> {
        match self {
            Self::File(path) => open_db(path),
            Self::Memory => open_db_in_memory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db: DbLocation,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
    /// Tag reported by the person stub repository.
    pub app_version: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = var(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidValue {
                name: ENV_BIND_ADDR,
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let db = match var(ENV_DB_PATH) {
            Some(path) if path == MEMORY_DB_PATH => DbLocation::Memory,
            Some(path) => DbLocation::File(PathBuf::from(path)),
            None => DbLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        let app_version = match var(ENV_APP_VERSION) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|err| ConfigError::InvalidValue {
                    name: ENV_APP_VERSION,
                    value: raw.clone(),
                    reason: err.to_string(),
                })?,
            None => DEFAULT_APP_VERSION,
        };

        Ok(Self {
            bind_addr,
            db,
            log_level: var(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var(ENV_LOG_DIR),
            app_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DbLocation, ServerConfig, ENV_APP_VERSION, ENV_BIND_ADDR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("defaults must parse");

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.db,
            DbLocation::File(PathBuf::from("quotebook.sqlite3"))
        );
        assert_eq!(config.app_version, 55);
        assert_eq!(config.log_dir, None);
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(ENV_BIND_ADDR, "  "), ("QUOTEBOOK_LOG_DIR", "")])
            .expect("blank values fall back");

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            (ENV_BIND_ADDR, "0.0.0.0:9000"),
            ("QUOTEBOOK_DB_PATH", ":memory:"),
            ("QUOTEBOOK_LOG_LEVEL", "warn"),
            ("QUOTEBOOK_LOG_DIR", "/var/log/quotebook"),
            (ENV_APP_VERSION, "7"),
        ])
        .expect("overrides must parse");

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.db, DbLocation::Memory);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/quotebook"));
        assert_eq!(config.app_version, 7);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = config_from(&[(ENV_BIND_ADDR, "localhost")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { name, .. } if name == ENV_BIND_ADDR
        ));
    }

    #[test]
    fn invalid_app_version_is_rejected() {
        let err = config_from(&[(ENV_APP_VERSION, "-1")]).unwrap_err();
        assert!(err.to_string().contains(ENV_APP_VERSION));
    }

    #[test]
    fn file_location_opens_migrated_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let location = DbLocation::File(dir.path().join("quotebook.sqlite3"));

        let conn = location.open().expect("open file db");
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .expect("user_version");
        assert!(version > 0);
    }
}

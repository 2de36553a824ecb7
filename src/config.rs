//! Configuration loaded from environment variables.
//!
//! `.env` is read first when present; real environment variables win.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "costume_rental=debug,tower_http=debug";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// PostgreSQL URL; the in-memory store is used when unset
    pub database_url: Option<String>,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Apply `migrations/` at startup
    pub run_migrations: bool,
    /// Listen port, bound on 0.0.0.0
    pub port: u16,
    /// JSON costume catalog for the in-memory store
    pub costume_catalog: Option<PathBuf>,
    /// Fallback filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
            port: DEFAULT_PORT,
            costume_catalog: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            max_connections: match non_empty("DATABASE_MAX_CONNECTIONS") {
                Some(v) => parse_number("DATABASE_MAX_CONNECTIONS", &v)?,
                None => defaults.max_connections,
            },
            run_migrations: match non_empty("RUN_MIGRATIONS") {
                Some(v) => parse_bool("RUN_MIGRATIONS", &v)?,
                None => defaults.run_migrations,
            },
            port: match non_empty("PORT") {
                Some(v) => parse_number("PORT", &v)?,
                None => defaults.port,
            },
            costume_catalog: non_empty("COSTUME_CATALOG").map(PathBuf::from),
            log_filter: defaults.log_filter,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            expected: "a positive integer",
            value: value.to_string(),
        })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            expected: "a boolean",
            value: value.to_string(),
        }),
    }
}

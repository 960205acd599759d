//! Application configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `MONGODB_CONN` | required when `STORE_MODE=mongo` |
//! | `MONGODB_DATABASE` | `samples` |
//! | `MONGODB_COLLECTION` | `restaurants` |
//! | `STORE_MODE` | `mongo` (`mongo` or `in_memory`) |
//! | `STORE_TIMEOUT_MS` | `5000` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::restaurants::DEFAULT_COLLECTION;

pub const DEFAULT_DATABASE: &str = "samples";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("MONGODB_CONN must be set when STORE_MODE is mongo")]
    MissingConnectionString,

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("Invalid STORE_MODE '{0}', expected 'mongo' or 'in_memory'")]
    InvalidStoreMode(String),

    #[error("Invalid {name} '{value}': {message}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        message: String,
    },
}

/// Which [`DocumentStore`](crate::store::DocumentStore) backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreMode {
    #[default]
    Mongo,
    InMemory,
}

impl FromStr for StoreMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigError::InvalidStoreMode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub store_mode: StoreMode,
    pub connection_string: Option<String>,
    pub database: String,
    pub collection: String,
    pub store_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Unset and set-but-empty are treated alike for optional values.
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store_mode = match var("STORE_MODE") {
            Some(value) => value.parse()?,
            None => StoreMode::default(),
        };

        let connection_string = var("MONGODB_CONN");
        if store_mode == StoreMode::Mongo && connection_string.is_none() {
            return Err(ConfigError::MissingConnectionString);
        }

        let database = non_blank(&lookup, "MONGODB_DATABASE", DEFAULT_DATABASE)?;
        let collection = non_blank(&lookup, "MONGODB_COLLECTION", DEFAULT_COLLECTION)?;

        let timeout_ms = parse_number("STORE_TIMEOUT_MS", var("STORE_TIMEOUT_MS"), DEFAULT_TIMEOUT_MS)?;
        let port = parse_number("PORT", var("PORT"), DEFAULT_PORT)?;

        Ok(Self {
            store_mode,
            connection_string,
            database,
            collection,
            store_timeout: Duration::from_millis(timeout_ms),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unset falls back to `default`; set but blank is an error.
fn non_blank(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Blank(name)),
        Some(value) => Ok(value.trim().to_string()),
    }
}

fn parse_number<N>(name: &'static str, value: Option<String>, default: N) -> Result<N, ConfigError>
where
    N: FromStr,
    N::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: N::Err| ConfigError::InvalidNumber {
            name,
            message: e.to_string(),
            value,
        }),
    }
}

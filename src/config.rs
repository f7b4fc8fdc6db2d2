//! Environment-driven configuration for Taskdeck.
//!
//! Values are read once at start-up. [`AppConfig::from_lookup`] takes an
//! arbitrary lookup function so tests can supply variables without touching
//! the process environment.

use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Connection string used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/taskdeck";
/// Pool size used when `TASKDECK_DB_POOL_SIZE` is unset.
pub const DEFAULT_POOL_SIZE: u32 = 10;
/// Log filter used when `TASKDECK_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "taskdeck=info";

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const POOL_SIZE_VAR: &str = "TASKDECK_DB_POOL_SIZE";
const LOG_FILTER_VAR: &str = "TASKDECK_LOG";
const LOG_FORMAT_VAR: &str = "TASKDECK_LOG_FORMAT";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to an unusable value.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was refused.
        reason: String,
    },
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected plain or json")),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
            format: LogFormat::Plain,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for unset or
    /// blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be used.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let url = read(DATABASE_URL_VAR).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let pool_size = read(POOL_SIZE_VAR)
            .map(|raw| parse_pool_size(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let filter = read(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        let format = read(LOG_FORMAT_VAR)
            .map(|raw| {
                raw.parse::<LogFormat>()
                    .map_err(|reason| ConfigError::InvalidValue {
                        name: LOG_FORMAT_VAR,
                        reason,
                    })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            database: DatabaseConfig { url, pool_size },
            log: LogConfig { filter, format },
        })
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map(NonZeroU32::get)
        .map_err(|err| ConfigError::InvalidValue {
            name: POOL_SIZE_VAR,
            reason: err.to_string(),
        })
}

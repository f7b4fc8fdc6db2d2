//! Structured logging set-up.
//!
//! The library only emits `tracing` events; binaries and test harnesses call
//! [`init_tracing`] once to install a subscriber.

use crate::config::{LogConfig, LogFormat};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser failure.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the event filter from the configured directive.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the directive is malformed.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.filter).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.filter.clone(),
        source,
    })
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is malformed or a subscriber
/// has already been installed for this process.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let output = match config.format {
        LogFormat::Plain => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;

    tracing::debug!(filter = %config.filter, format = ?config.format, "tracing initialised");
    Ok(())
}

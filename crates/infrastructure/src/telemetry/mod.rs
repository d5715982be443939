//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either
//! human-readable or JSON output.

use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Parse a format name; anything other than "json" is text
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = ?config.format, "Tracing initialized");
    Ok(())
}

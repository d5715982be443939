//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `cache`: Weather cache TTL and sweep interval
//! - `planner`: Reference timezone and alternative-date search
//!
//! The `weather` section reuses the client configuration from
//! `integration_weather`.

mod cache;
mod planner;
mod server;

use std::time::Duration;

use application::error::ApplicationError;
use application::services::AlternativeSearchConfig;
use domain::value_objects::Timezone;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use cache::CacheConfig;
pub use integration_weather::WeatherConfig;
pub use planner::PlannerConfig;
pub use server::ServerConfig;

use crate::telemetry::{LogFormat, LoggingConfig};

/// Environment variable prefix, e.g. `EVENT_PLANNER__SERVER__PORT`
pub const ENV_PREFIX: &str = "EVENT_PLANNER";

/// Fallback variable for the provider key
pub const API_KEY_FALLBACK_VAR: &str = "OPENWEATHER_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Planner configuration
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Load configuration: defaults, then optional `config.toml`, then
    /// `EVENT_PLANNER__*` environment variables
    pub fn load() -> Result<Self, ApplicationError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::env_source());

        let mut config = Self::build(builder)?;
        config.apply_api_key_fallback(std::env::var(API_KEY_FALLBACK_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml(toml: &str) -> Result<Self, ApplicationError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        let config = Self::build(builder)?;
        config.validate()?;
        Ok(config)
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ApplicationError> {
        builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    /// Use `fallback` as the API key when none was configured
    pub fn apply_api_key_fallback(&mut self, fallback: Option<String>) {
        if self.weather.api_key.trim().is_empty() {
            if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
                self.weather.api_key = key;
            }
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.timezone()?;

        if self.cache.ttl_secs == 0 {
            return Err(ApplicationError::Configuration(
                "cache.ttl_secs must be greater than 0".into(),
            ));
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(ApplicationError::Configuration(
                "cache.sweep_interval_secs must be greater than 0".into(),
            ));
        }
        if self.planner.max_concurrent_lookups == 0 {
            return Err(ApplicationError::Configuration(
                "planner.max_concurrent_lookups must be greater than 0".into(),
            ));
        }
        if !(1..=application::services::MAX_WINDOW_DAYS)
            .contains(&self.planner.default_alternative_window)
        {
            return Err(ApplicationError::Configuration(format!(
                "planner.default_alternative_window must be between 1 and {}",
                application::services::MAX_WINDOW_DAYS
            )));
        }
        if self.weather.api_key.trim().is_empty() {
            warn!("No weather API key configured; provider requests will be rejected");
        }
        Ok(())
    }

    /// Reference timezone for date resolution
    pub fn timezone(&self) -> Result<Timezone, ApplicationError> {
        Timezone::parse(&self.planner.timezone)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache.sweep_interval_secs)
    }

    /// Settings for the alternative-date search
    #[must_use]
    pub const fn alternative_search(&self) -> AlternativeSearchConfig {
        AlternativeSearchConfig {
            default_window_days: self.planner.default_alternative_window,
            max_concurrent_lookups: self.planner.max_concurrent_lookups,
            lookup_timeout: Duration::from_secs(self.planner.lookup_timeout_secs),
        }
    }

    /// Logging settings derived from the server section
    #[must_use]
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            filter: self.server.log_filter.clone(),
            format: LogFormat::from_name(&self.server.log_format),
        }
    }
}

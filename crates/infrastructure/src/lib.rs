//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenWeatherMap
//! provider adapter and the in-memory event store. Also owns configuration
//! loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, CacheConfig, PlannerConfig, ServerConfig, WeatherConfig};
pub use persistence::InMemoryEventStore;
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_tracing};

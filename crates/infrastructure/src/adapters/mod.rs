//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod weather_adapter;

pub use weather_adapter::WeatherProviderAdapter;

//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod event_store;
mod weather_port;

pub use event_store::EventStore;
#[cfg(test)]
pub use event_store::MockEventStore;
#[cfg(test)]
pub use weather_port::MockWeatherProviderPort;
pub use weather_port::{ForecastSlot, RawCurrentWeather, RawForecast, WeatherProviderPort};

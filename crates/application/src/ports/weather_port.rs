//! Weather provider port
//!
//! Defines the interface for fetching raw weather data from an external
//! provider. Normalization into daily records happens in the application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current conditions as reported by the provider
///
/// Units are metric: °C, m/s for wind, mm for rain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentWeather {
    /// Location name resolved by the provider
    pub location: String,
    /// ISO country code
    pub country: Option<String>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Lowest temperature currently observed in the area
    pub temperature_min: f64,
    /// Highest temperature currently observed in the area
    pub temperature_max: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Cloud cover in percent (0-100)
    pub cloudiness: u8,
    /// Rain volume over the last hour in mm
    pub rain_1h: Option<f64>,
    /// Rain volume over the last three hours in mm
    pub rain_3h: Option<f64>,
    /// Primary condition label (e.g. "Clear", "Rain")
    pub condition: String,
    /// Free-text condition description
    pub description: String,
}

/// One forecast timeslot (three hours for OpenWeatherMap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    /// Start of the slot
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Cloud cover in percent (0-100)
    pub cloudiness: u8,
    /// Precipitation volume over the slot in mm
    pub precipitation: f64,
    /// Primary condition label
    pub condition: String,
    /// Free-text condition description
    pub description: String,
}

/// Forecast window for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    /// Location name resolved by the provider
    pub location: String,
    /// ISO country code
    pub country: Option<String>,
    /// Offset of the location's local time from UTC in seconds
    pub utc_offset_secs: i32,
    /// Timeslots in provider order
    pub slots: Vec<ForecastSlot>,
}

/// Port for weather provider operations
///
/// Implementations bound every call with their own timeout and map
/// transport failures onto `ProviderUnavailable`, `LocationNotFound`,
/// `RateLimited` or `AuthFailed`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Fetch current conditions for a location
    async fn fetch_current(&self, location: &str) -> Result<RawCurrentWeather, ApplicationError>;

    /// Fetch the forecast window covering `days` days
    async fn fetch_forecast_window(
        &self,
        location: &str,
        days: u8,
    ) -> Result<RawForecast, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherProviderPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherProviderPort>();
    }

    #[tokio::test]
    async fn mock_surfaces_provider_errors() {
        let mut mock = MockWeatherProviderPort::new();
        mock.expect_fetch_current()
            .returning(|_| Err(ApplicationError::RateLimited));

        let result = mock.fetch_current("Berlin").await;
        assert!(matches!(result, Err(ApplicationError::RateLimited)));
    }
}

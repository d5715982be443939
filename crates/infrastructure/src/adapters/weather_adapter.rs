//! Weather adapter - Implements WeatherProviderPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{ForecastSlot, RawCurrentWeather, RawForecast, WeatherProviderPort};
use async_trait::async_trait;
use integration_weather::{
    CurrentWeather, Forecast, ForecastEntry, OpenWeatherMapClient, WeatherClient, WeatherConfig,
    WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap API
pub struct WeatherProviderAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProviderAdapter")
            .field("client", &"WeatherClient")
            .finish()
    }
}

impl WeatherProviderAdapter {
    /// Create an adapter backed by an OpenWeatherMap client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Wrap an existing client
    pub fn new(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::Unauthorized => ApplicationError::AuthFailed,
            WeatherError::LocationNotFound(location) => {
                ApplicationError::LocationNotFound(location)
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::ServiceUnavailable(e)
            | WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ParseError(e) => ApplicationError::ProviderUnavailable(e),
        }
    }

    fn map_current(current: CurrentWeather) -> RawCurrentWeather {
        RawCurrentWeather {
            location: current.location,
            country: current.country,
            temperature: current.temperature,
            temperature_min: current.temperature_min,
            temperature_max: current.temperature_max,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            cloudiness: current.cloudiness,
            rain_1h: current.rain_1h,
            rain_3h: current.rain_3h,
            condition: current.condition,
            description: current.description,
        }
    }

    fn map_slot(entry: ForecastEntry) -> ForecastSlot {
        ForecastSlot {
            timestamp: entry.time,
            temperature: entry.temperature,
            humidity: entry.humidity,
            wind_speed: entry.wind_speed,
            cloudiness: entry.cloudiness,
            precipitation: entry.rain_3h,
            condition: entry.condition,
            description: entry.description,
        }
    }

    fn map_forecast(forecast: Forecast) -> RawForecast {
        RawForecast {
            location: forecast.location,
            country: forecast.country,
            utc_offset_secs: forecast.utc_offset_secs,
            slots: forecast.entries.into_iter().map(Self::map_slot).collect(),
        }
    }
}

#[async_trait]
impl WeatherProviderPort for WeatherProviderAdapter {
    #[instrument(skip(self))]
    async fn fetch_current(&self, location: &str) -> Result<RawCurrentWeather, ApplicationError> {
        let result = self.client.get_current(location).await;

        match &result {
            Ok(current) => {
                debug!(
                    temperature = current.temperature,
                    condition = %current.condition,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        result.map(Self::map_current).map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn fetch_forecast_window(
        &self,
        location: &str,
        days: u8,
    ) -> Result<RawForecast, ApplicationError> {
        let result = self.client.get_forecast(location, days).await;

        match &result {
            Ok(forecast) => debug!(slots = forecast.len(), "Retrieved forecast"),
            Err(e) => debug!(error = %e, "Failed to get forecast"),
        }

        result.map(Self::map_forecast).map_err(Self::map_error)
    }
}

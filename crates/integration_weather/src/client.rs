//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap 2.5 API (`/weather` and `/forecast`).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    ConditionData, CurrentResponse, CurrentWeather, ErrorBody, Forecast, ForecastEntry,
    ForecastItem, ForecastResponse,
};

/// Forecast slots per day (3-hour resolution)
pub const SLOTS_PER_DAY: u16 = 8;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// API key rejected (HTTP 401)
    #[error("Invalid API key for weather service")]
    Unauthorized,

    /// Unknown location (HTTP 404)
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service is temporarily unavailable (HTTP 5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Connection to the weather service failed or timed out
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request rejected with another status
    #[error("Weather API error: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a location name
    async fn get_current(&self, location: &str) -> Result<CurrentWeather, WeatherError>;

    /// Get the 3-hour forecast covering `days` days
    async fn get_forecast(&self, location: &str, days: u8) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{resource}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a GET and decode the JSON body, mapping statuses to errors
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        location: &str,
        extra: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.endpoint(resource);
        debug!(url = %url, location = %location, "Requesting weather data");

        let mut query: Vec<(&str, String)> = vec![
            ("q", location.to_string()),
            ("appid", self.config.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        query.extend_from_slice(extra);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        let response = Self::check_status(response, location).await?;
        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    async fn check_status(response: Response, location: &str) -> Result<Response, WeatherError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            StatusCode::NOT_FOUND => Err(WeatherError::LocationNotFound(location.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(WeatherError::RateLimitExceeded),
            s if s.is_server_error() => Err(WeatherError::ServiceUnavailable(format!("HTTP {s}"))),
            s => {
                let body: ErrorBody = response.json().await.unwrap_or_default();
                Err(WeatherError::RequestFailed(
                    body.message.unwrap_or_else(|| format!("HTTP {s}")),
                ))
            },
        }
    }

    fn timestamp(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| WeatherError::ParseError(format!("Invalid timestamp: {secs}")))
    }

    fn primary_condition(weather: &[ConditionData]) -> Result<&ConditionData, WeatherError> {
        weather
            .first()
            .ok_or_else(|| WeatherError::ParseError("No weather condition in response".to_string()))
    }

    fn parse_current(raw: CurrentResponse) -> Result<CurrentWeather, WeatherError> {
        let condition = Self::primary_condition(&raw.weather)?;
        let rain = raw.rain.unwrap_or_default();

        Ok(CurrentWeather {
            observed_at: Self::timestamp(raw.dt)?,
            condition: condition.main.clone(),
            description: condition.description.clone(),
            location: raw.name,
            country: raw.sys.country,
            temperature: raw.main.temp,
            temperature_min: raw.main.temp_min,
            temperature_max: raw.main.temp_max,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            cloudiness: raw.clouds.all,
            rain_1h: rain.one_hour,
            rain_3h: rain.three_hours,
        })
    }

    fn parse_entry(item: ForecastItem) -> Result<ForecastEntry, WeatherError> {
        let condition = Self::primary_condition(&item.weather)?;

        Ok(ForecastEntry {
            time: Self::timestamp(item.dt)?,
            condition: condition.main.clone(),
            description: condition.description.clone(),
            temperature: item.main.temp,
            humidity: item.main.humidity,
            wind_speed: item.wind.speed,
            cloudiness: item.clouds.all,
            rain_3h: item.rain.and_then(|r| r.three_hours).unwrap_or(0.0),
            precipitation_probability: item.pop,
        })
    }

    fn parse_forecast(raw: ForecastResponse) -> Result<Forecast, WeatherError> {
        let entries = raw
            .list
            .into_iter()
            .map(Self::parse_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Forecast {
            location: raw.city.name,
            country: raw.city.country,
            utc_offset_secs: raw.city.timezone,
            entries,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn get_current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        let raw: CurrentResponse = self.get_json("weather", location, &[]).await?;
        Self::parse_current(raw)
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, location: &str, days: u8) -> Result<Forecast, WeatherError> {
        let count = u16::from(days.max(1)) * SLOTS_PER_DAY;
        let raw: ForecastResponse = self
            .get_json("forecast", location, &[("cnt", count.to_string())])
            .await?;
        Self::parse_forecast(raw)
    }
}

//! Weather data models
//!
//! Parsed OpenWeatherMap observations plus the raw wire shapes they are
//! decoded from. Units are metric: °C, m/s, mm.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// City name as resolved by the provider
    pub location: String,
    /// ISO country code
    pub country: Option<String>,
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Temperature in °C
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Relative humidity (%)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub cloudiness: u8,
    /// Rain over the last hour (mm)
    pub rain_1h: Option<f64>,
    /// Rain over the last three hours (mm)
    pub rain_3h: Option<f64>,
    /// Condition group label, e.g. "Clear" or "Rain"
    pub condition: String,
    pub description: String,
}

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    pub cloudiness: u8,
    /// Rain accumulated over the slot (mm), zero when absent
    pub rain_3h: f64,
    /// Provider probability of precipitation (0.0-1.0)
    pub precipitation_probability: Option<f64>,
    pub condition: String,
    pub description: String,
}

/// 3-hour forecast for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub country: Option<String>,
    /// City offset from UTC in seconds
    pub utc_offset_secs: i32,
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    /// Number of slots returned
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Condition entry of the `weather` array
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConditionData {
    pub main: String,
    #[serde(default)]
    pub description: String,
}

/// `main` block shared by both endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MainData {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WindData {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CloudData {
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RainData {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SysData {
    pub country: Option<String>,
}

/// Raw `/weather` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentResponse {
    #[serde(default)]
    pub name: String,
    pub dt: i64,
    pub main: MainData,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
    #[serde(default)]
    pub wind: WindData,
    #[serde(default)]
    pub clouds: CloudData,
    #[serde(default)]
    pub rain: Option<RainData>,
    #[serde(default)]
    pub sys: SysData,
}

/// Raw `/forecast` list item
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastItem {
    pub dt: i64,
    pub main: MainData,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
    #[serde(default)]
    pub wind: WindData,
    #[serde(default)]
    pub clouds: CloudData,
    #[serde(default)]
    pub rain: Option<RainData>,
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CityData {
    #[serde(default)]
    pub name: String,
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: i32,
}

/// Raw `/forecast` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
    pub city: CityData,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

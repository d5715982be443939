//! Daily weather record - one aggregated weather snapshot per location and date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::WeatherCondition;

/// Aggregated weather for a single calendar date at a location
///
/// Temperatures are in °C, wind speed in km/h, precipitation in mm, and
/// humidity, cloudiness and precipitation probability in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeatherRecord {
    /// Location name as reported by the provider
    pub location: String,
    /// ISO country code, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Calendar date this record describes
    pub date: NaiveDate,
    /// Mean temperature
    pub temperature: f64,
    /// Minimum temperature
    pub min_temperature: f64,
    /// Maximum temperature
    pub max_temperature: f64,
    /// Mean relative humidity
    pub humidity: u8,
    /// Mean wind speed
    pub wind_speed: f64,
    /// Mean cloud cover
    pub cloudiness: u8,
    /// Accumulated precipitation
    pub precipitation: f64,
    /// Chance of precipitation (0-100)
    pub precipitation_probability: u8,
    /// Dominant condition for the day
    pub condition: WeatherCondition,
    /// Free-text description of the dominant condition
    pub description: String,
    /// When the data was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl DailyWeatherRecord {
    /// Check the record's invariants
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeatherRecord` when a numeric field is non-finite,
    /// a percentage exceeds 100, wind or precipitation is negative, or the
    /// minimum temperature exceeds the maximum.
    pub fn validate(&self) -> Result<(), DomainError> {
        let finite = [
            ("temperature", self.temperature),
            ("minTemperature", self.min_temperature),
            ("maxTemperature", self.max_temperature),
            ("windSpeed", self.wind_speed),
            ("precipitation", self.precipitation),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(DomainError::invalid_record(format!(
                    "{field} must be a finite number"
                )));
            }
        }

        let percentages = [
            ("humidity", self.humidity),
            ("cloudiness", self.cloudiness),
            ("precipitationProbability", self.precipitation_probability),
        ];
        for (field, value) in percentages {
            if value > 100 {
                return Err(DomainError::invalid_record(format!(
                    "{field} must be between 0 and 100 (got {value})"
                )));
            }
        }

        if self.wind_speed < 0.0 {
            return Err(DomainError::invalid_record("windSpeed must not be negative"));
        }
        if self.precipitation < 0.0 {
            return Err(DomainError::invalid_record(
                "precipitation must not be negative",
            ));
        }
        if self.min_temperature > self.max_temperature {
            return Err(DomainError::invalid_record(
                "minTemperature must not exceed maxTemperature",
            ));
        }

        Ok(())
    }
}

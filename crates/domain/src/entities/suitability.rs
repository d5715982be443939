//! Suitability analysis - result of scoring a day's weather for an event

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::DailyWeatherRecord;
use crate::value_objects::{EventId, EventType, FactorStatus, SuitabilityRating, WeatherCondition};

/// Raw measurement a factor was decided on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Number(f64),
    Condition(WeatherCondition),
}

impl From<f64> for FactorValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<WeatherCondition> for FactorValue {
    fn from(condition: WeatherCondition) -> Self {
        Self::Condition(condition)
    }
}

/// Score and verdict for one weather dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorResult {
    /// Points awarded for this factor
    pub score: u32,
    /// Outcome bucket
    pub status: FactorStatus,
    /// Human-readable explanation
    pub message: String,
    /// Raw measured value the factor was decided on
    pub value: FactorValue,
    /// Unit of `value`, empty for conditions
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    /// Accumulated precipitation in mm (precipitation factor only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl FactorResult {
    /// Create a factor result
    #[must_use]
    pub fn new(
        score: u32,
        status: FactorStatus,
        message: impl Into<String>,
        value: impl Into<FactorValue>,
        unit: &str,
    ) -> Self {
        Self {
            score,
            status,
            message: message.into(),
            value: value.into(),
            unit: unit.to_string(),
            amount: None,
        }
    }

    /// Attach an accumulated precipitation amount
    #[must_use]
    pub const fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// The four scored dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    pub temperature: FactorResult,
    pub precipitation: FactorResult,
    pub wind: FactorResult,
    pub conditions: FactorResult,
}

impl Factors {
    /// Sum of all factor scores
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.temperature.score + self.precipitation.score + self.wind.score + self.conditions.score
    }
}

/// Full suitability verdict for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitabilityAnalysis {
    /// Event the analysis was produced for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    pub event_type: EventType,
    pub location: String,
    pub date: NaiveDate,
    /// Total score (0-110)
    #[serde(rename = "suitabilityScore")]
    pub score: u32,
    #[serde(rename = "suitabilityRating")]
    pub rating: SuitabilityRating,
    pub factors: Factors,
    pub recommendations: Vec<String>,
    /// Weather the analysis was computed from
    pub weather: DailyWeatherRecord,
    pub generated_at: DateTime<Utc>,
}

/// Condensed weather shown next to alternative dates and event listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub temperature: f64,
    pub precipitation_probability: u8,
    pub wind_speed: f64,
    pub conditions: String,
}

impl From<&DailyWeatherRecord> for WeatherSummary {
    fn from(record: &DailyWeatherRecord) -> Self {
        Self {
            temperature: record.temperature,
            precipitation_probability: record.precipitation_probability,
            wind_speed: record.wind_speed,
            conditions: record.description.clone(),
        }
    }
}

/// A candidate date scored as an alternative to the planned one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeDate {
    pub date: NaiveDate,
    /// English weekday name, e.g. "Saturday"
    pub day_of_week: String,
    #[serde(rename = "suitabilityScore")]
    pub score: u32,
    #[serde(rename = "suitabilityRating")]
    pub rating: SuitabilityRating,
    pub weather: WeatherSummary,
}

impl AlternativeDate {
    /// Build an alternative entry from a finished analysis
    #[must_use]
    pub fn from_analysis(analysis: &SuitabilityAnalysis) -> Self {
        Self {
            date: analysis.date,
            day_of_week: analysis.date.format("%A").to_string(),
            score: analysis.score,
            rating: analysis.rating,
            weather: WeatherSummary::from(&analysis.weather),
        }
    }
}

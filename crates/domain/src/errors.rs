//! Domain-level errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A forecast window contained no timeslots to aggregate
    #[error("Forecast data is empty")]
    EmptyForecastData,

    /// Requested date lies outside the supported forecast horizon
    #[error(
        "Weather data only available for current day and next 5 days (requested {date}, {horizon_days} days from today)"
    )]
    UnsupportedDateRange { date: NaiveDate, horizon_days: i64 },

    /// Provider returned a forecast window that does not cover the date
    #[error("No forecast available for date: {0}")]
    NoForecastForDate(NaiveDate),

    /// Weather record is missing values or holds non-finite/out-of-range ones
    #[error("Invalid weather record: {0}")]
    InvalidWeatherRecord(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Unknown timezone identifier
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create an invalid weather record error
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidWeatherRecord(reason.into())
    }
}

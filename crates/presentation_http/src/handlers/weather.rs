//! Weather lookup handlers

use application::{CacheStats, MAX_FORECAST_DAYS};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::DailyWeatherRecord;
use serde::Deserialize;
use tracing::instrument;

use super::common::{ApiResponse, parse_date};
use crate::{error::ApiError, state::AppState};

/// Forecast query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<String>,
}

impl ForecastQuery {
    /// Requested window; missing, zero, or unparsable values mean the full window
    fn days(&self) -> Result<u8, ApiError> {
        let requested = self
            .days
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .filter(|d| *d != 0)
            .unwrap_or(i64::from(MAX_FORECAST_DAYS));

        u8::try_from(requested)
            .ok()
            .filter(|d| (1..=MAX_FORECAST_DAYS).contains(d))
            .ok_or_else(|| ApiError::BadRequest("Days parameter must be between 1 and 5".into()))
    }
}

/// Weather for a location on a calendar date
#[instrument(skip(state))]
pub async fn weather_for_date(
    State(state): State<AppState>,
    Path((location, date)): Path<(String, String)>,
) -> Result<Json<ApiResponse<DailyWeatherRecord>>, ApiError> {
    let date = parse_date(&date)
        .ok_or_else(|| ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD".into()))?;
    let record = state.weather.get_weather_for_date(&location, date).await?;
    Ok(Json(ApiResponse::ok(record)))
}

#[instrument(skip(state))]
pub async fn current_weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<ApiResponse<DailyWeatherRecord>>, ApiError> {
    let record = state.weather.get_current_weather(&location).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// Daily forecast for up to five days
#[instrument(skip(state, query))]
pub async fn forecast(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ApiResponse<Vec<DailyWeatherRecord>>>, ApiError> {
    let days = query.days()?;
    let records = state.weather.get_forecast(&location, days).await?;
    let count = records.len();
    Ok(Json(ApiResponse::ok(records).with_count(count)))
}

pub async fn cache_status(State(state): State<AppState>) -> Json<ApiResponse<CacheStats>> {
    Json(ApiResponse::ok(state.weather.cache_stats()))
}

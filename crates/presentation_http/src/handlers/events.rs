//! Event planning handlers
//!
//! CRUD over planned events plus the weather-driven endpoints: on-demand
//! weather check, cached suitability, and alternative-date search.

use std::borrow::Cow;

use application::{AlternativesReport, EventWithStatus, NewEvent};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use domain::{Event, EventType, EventUpdate, SuitabilityAnalysis};
use serde::Deserialize;
use tracing::{debug, instrument};
use validator::{Validate, ValidationError};

use super::common::{ApiResponse, parse_date, parse_event_id};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Create event request body
///
/// Required fields default to empty so a missing field surfaces as a field
/// validation error rather than a JSON decode error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "location must be 1-100 characters"))]
    pub location: String,

    #[serde(default)]
    #[validate(custom(function = "validate_date"))]
    pub date: String,

    #[serde(default)]
    #[validate(custom(function = "validate_event_type"))]
    pub event_type: String,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Update event request body; every field is optional
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "location must be 1-100 characters"))]
    pub location: Option<String>,

    #[validate(custom(function = "validate_date"))]
    pub date: Option<String>,

    #[validate(custom(function = "validate_event_type"))]
    pub event_type: Option<String>,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

fn validate_date(value: &str) -> Result<(), ValidationError> {
    if parse_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("date")
            .with_message(Cow::Borrowed("date must be a valid YYYY-MM-DD date")))
    }
}

fn validate_event_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<EventType>().map(|_| ()).map_err(|_| {
        ValidationError::new("event_type").with_message(Cow::Borrowed(
            "eventType must be one of outdoor_sports, wedding, hiking, corporate_outdoor, general",
        ))
    })
}

impl TryFrom<CreateEventRequest> for NewEvent {
    type Error = ApiError;

    fn try_from(req: CreateEventRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&req.date)
                .ok_or_else(|| ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD".into()))?,
            event_type: req.event_type.parse()?,
            name: req.name,
            location: req.location,
            description: req.description,
        })
    }
}

impl TryFrom<UpdateEventRequest> for EventUpdate {
    type Error = ApiError;

    fn try_from(req: UpdateEventRequest) -> Result<Self, Self::Error> {
        let date = req
            .date
            .map(|d| {
                parse_date(&d)
                    .ok_or_else(|| ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD".into()))
            })
            .transpose()?;
        let event_type = req.event_type.map(|t| t.parse::<EventType>()).transpose()?;

        Ok(Self {
            name: req.name,
            location: req.location,
            date,
            event_type,
            description: req.description,
        })
    }
}

/// Query for the alternative-date search
#[derive(Debug, Default, Deserialize)]
pub struct AlternativesQuery {
    /// Window in days; non-numeric values fall back to the configured default
    pub days: Option<String>,
}

impl AlternativesQuery {
    /// Requested window; negative values are rejected
    fn window(&self) -> Result<Option<u32>, ApiError> {
        let Some(requested) = self
            .days
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
        else {
            return Ok(None);
        };

        if requested < 0 {
            return Err(ApiError::BadRequest(
                "Days parameter must not be negative".into(),
            ));
        }
        // Oversized windows are rejected by the planner
        Ok(Some(u32::try_from(requested).unwrap_or(u32::MAX)))
    }
}

/// List all events with their current weather status
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EventWithStatus>>>, ApiError> {
    let events = state.planner.list_events().await?;
    let count = events.len();
    Ok(Json(ApiResponse::ok(events).with_count(count)))
}

/// Create an event and attempt an initial weather analysis
#[instrument(skip(state, request), fields(location = %request.location))]
pub async fn create_event(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.planner.create_event(request.try_into()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(event).with_message("Event created successfully")),
    ))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let id = parse_event_id(&id)?;
    let event = state.planner.get_event(&id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// Apply a partial update; re-analyzes when location or date change
#[instrument(skip(state, request))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let id = parse_event_id(&id)?;
    let event = state.planner.update_event(&id, request.try_into()?).await?;
    Ok(Json(
        ApiResponse::ok(event).with_message("Event updated successfully"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_event_id(&id)?;
    state.planner.delete_event(&id).await?;
    Ok(Json(ApiResponse::message_only("Event deleted successfully")))
}

/// Fetch fresh weather and store the resulting analysis on the event
#[instrument(skip(state))]
pub async fn weather_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SuitabilityAnalysis>>, ApiError> {
    let id = parse_event_id(&id)?;
    let analysis = state.planner.weather_check(&id).await?;
    debug!(score = analysis.score, "Weather check complete");
    Ok(Json(ApiResponse::ok(analysis)))
}

#[instrument(skip(state, query))]
pub async fn alternatives(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AlternativesQuery>,
) -> Result<Json<ApiResponse<AlternativesReport>>, ApiError> {
    let id = parse_event_id(&id)?;
    let report = state.planner.alternatives(&id, query.window()?).await?;
    let count = report.alternatives.len();
    Ok(Json(ApiResponse::ok(report).with_count(count)))
}

/// Stored analysis, computed on first request
#[instrument(skip(state))]
pub async fn suitability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SuitabilityAnalysis>>, ApiError> {
    let id = parse_event_id(&id)?;
    let analysis = state.planner.suitability(&id).await?;
    Ok(Json(ApiResponse::ok(analysis)))
}

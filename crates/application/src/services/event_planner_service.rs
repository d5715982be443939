//! Event planner service
//!
//! Event CRUD plus the weather use cases built on top of it: attaching a
//! suitability analysis, listing events with a weather status, and finding
//! alternative dates.

use std::sync::Arc;

use chrono::NaiveDate;
use domain::entities::{AlternativeDate, Event, EventUpdate, SuitabilityAnalysis};
use domain::value_objects::{EventId, EventType, SuitabilityRating};
use domain::DomainError;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::alternative_dates::AlternativeDateSearch;
use super::suitability_scorer::SuitabilityScorer;
use super::weather_service::WeatherService;
use crate::error::ApplicationError;
use crate::ports::EventStore;

/// Largest alternative-date window accepted
pub const MAX_WINDOW_DAYS: u32 = 30;

/// Input for creating an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    pub description: Option<String>,
}

/// Weather verdict shown next to an event in listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherStatus {
    /// A fresh analysis succeeded
    Available {
        #[serde(rename = "suitabilityRating")]
        rating: SuitabilityRating,
        #[serde(rename = "suitabilityScore")]
        score: u32,
        temperature: f64,
        conditions: String,
    },
    /// Weather could not be determined
    Unavailable {
        #[serde(rename = "suitabilityRating")]
        rating: &'static str,
        error: &'static str,
    },
}

impl WeatherStatus {
    /// Status for events whose weather lookup failed
    #[must_use]
    pub const fn unavailable() -> Self {
        Self::Unavailable {
            rating: "Unknown",
            error: "Weather data unavailable",
        }
    }
}

impl From<&SuitabilityAnalysis> for WeatherStatus {
    fn from(analysis: &SuitabilityAnalysis) -> Self {
        Self::Available {
            rating: analysis.rating,
            score: analysis.score,
            temperature: analysis.weather.temperature,
            conditions: analysis.weather.description.clone(),
        }
    }
}

/// Event together with its current weather status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithStatus {
    #[serde(flatten)]
    pub event: Event,
    pub weather_status: WeatherStatus,
}

/// Ranked alternatives for an event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativesReport {
    pub event_id: EventId,
    pub original_date: NaiveDate,
    pub search_range_days: u32,
    pub alternatives: Vec<AlternativeDate>,
}

/// Orchestrates events, weather lookups and scoring
pub struct EventPlannerService {
    store: Arc<dyn EventStore>,
    weather: Arc<WeatherService>,
    scorer: SuitabilityScorer,
    search: AlternativeDateSearch,
}

impl std::fmt::Debug for EventPlannerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPlannerService")
            .field("weather", &self.weather)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl EventPlannerService {
    /// Create a new event planner service
    pub fn new(
        store: Arc<dyn EventStore>,
        weather: Arc<WeatherService>,
        search: AlternativeDateSearch,
    ) -> Self {
        Self {
            store,
            weather,
            scorer: SuitabilityScorer::new(),
            search,
        }
    }

    /// Weather service backing this planner
    #[must_use]
    pub const fn weather(&self) -> &Arc<WeatherService> {
        &self.weather
    }

    /// Store a new event and attach a weather analysis when one is available
    #[instrument(skip(self, new), fields(location = %new.location, date = %new.date))]
    pub async fn create_event(&self, new: NewEvent) -> Result<Event, ApplicationError> {
        let mut event = Event::new(new.name, new.location, new.date, new.event_type);
        if let Some(description) = new.description {
            event = event.with_description(description);
        }
        self.store.save(&event).await?;

        match self.analyze(&event).await {
            Ok(analysis) => {
                event.set_analysis(analysis);
                self.store.save(&event).await?;
            },
            Err(e) => warn!(event_id = %event.id, error = %e, "Weather analysis failed"),
        }

        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// All events with a freshly computed weather status
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<EventWithStatus>, ApplicationError> {
        let events = self.store.list().await?;

        let statuses = join_all(events.iter().map(|event| async move {
            match self.analyze(event).await {
                Ok(analysis) => WeatherStatus::from(&analysis),
                Err(e) => {
                    debug!(event_id = %event.id, error = %e, "Weather status unavailable");
                    WeatherStatus::unavailable()
                },
            }
        }))
        .await;

        Ok(events
            .into_iter()
            .zip(statuses)
            .map(|(event, weather_status)| EventWithStatus {
                event,
                weather_status,
            })
            .collect())
    }

    /// Look up a single event
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &EventId) -> Result<Event, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Event {id}")))
    }

    /// Apply a partial update; re-analyses when location or date changed
    #[instrument(skip(self, update))]
    pub async fn update_event(
        &self,
        id: &EventId,
        update: EventUpdate,
    ) -> Result<Event, ApplicationError> {
        let mut event = self.get_event(id).await?;
        let reanalyze = update.touches_weather();
        event.apply_update(update);

        if reanalyze {
            match self.analyze(&event).await {
                Ok(analysis) => event.set_analysis(analysis),
                Err(e) => {
                    // Analysis for the previous location/date no longer applies
                    event.weather_analysis = None;
                    warn!(event_id = %event.id, error = %e, "Weather analysis update failed");
                },
            }
        }

        self.store.save(&event).await?;
        debug!(event_id = %event.id, reanalyze, "Event updated");
        Ok(event)
    }

    /// Delete an event
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &EventId) -> Result<(), ApplicationError> {
        if self.store.delete(id).await? {
            info!(event_id = %id, "Event deleted");
            Ok(())
        } else {
            Err(ApplicationError::NotFound(format!("Event {id}")))
        }
    }

    /// Fresh analysis for an event, stored on the event
    ///
    /// Unlike creation and updates, weather failures are returned.
    #[instrument(skip(self))]
    pub async fn weather_check(
        &self,
        id: &EventId,
    ) -> Result<SuitabilityAnalysis, ApplicationError> {
        let mut event = self.get_event(id).await?;
        let analysis = self.analyze(&event).await?;
        event.set_analysis(analysis.clone());
        self.store.save(&event).await?;
        Ok(analysis)
    }

    /// Stored analysis, or a fresh one when none is stored yet
    #[instrument(skip(self))]
    pub async fn suitability(
        &self,
        id: &EventId,
    ) -> Result<SuitabilityAnalysis, ApplicationError> {
        let event = self.get_event(id).await?;
        if let Some(analysis) = event.weather_analysis {
            return Ok(analysis);
        }
        self.weather_check(id).await
    }

    /// Ranked alternative dates after the event's date
    ///
    /// `days` of `None` or `0` uses the configured default window.
    #[instrument(skip(self))]
    pub async fn alternatives(
        &self,
        id: &EventId,
        days: Option<u32>,
    ) -> Result<AlternativesReport, ApplicationError> {
        let window = match days {
            None | Some(0) => self.search.config().default_window_days,
            Some(d) if d <= MAX_WINDOW_DAYS => d,
            Some(d) => {
                return Err(DomainError::ValidationError(format!(
                    "days must be between 1 and {MAX_WINDOW_DAYS} (got {d})"
                ))
                .into());
            },
        };

        let event = self.get_event(id).await?;
        let alternatives = self
            .search
            .find_alternatives(self.weather.as_ref(), &event, window)
            .await;

        Ok(AlternativesReport {
            event_id: event.id,
            original_date: event.date,
            search_range_days: window,
            alternatives,
        })
    }

    async fn analyze(&self, event: &Event) -> Result<SuitabilityAnalysis, ApplicationError> {
        let record = self
            .weather
            .get_weather_for_date(&event.location, event.date)
            .await?;
        Ok(self.scorer.analyze(event, &record)?)
    }
}

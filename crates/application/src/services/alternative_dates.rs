//! Alternative-date search
//!
//! Scores the days following an event's date and ranks them. Lookups run
//! concurrently with a bounded fan-out; each one is isolated so a failed or
//! slow date is dropped instead of failing the search.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use domain::entities::{AlternativeDate, DailyWeatherRecord, Event};
use futures::stream::{self, StreamExt};
#[cfg(test)]
use mockall::automock;
use tracing::{debug, instrument};

use super::SuitabilityScorer;
use crate::error::ApplicationError;

/// Default number of days searched after the event date
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Source of daily weather for a location and date
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DailyWeatherSource: Send + Sync {
    /// Weather for `date` at `location`
    async fn weather_for_date(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<DailyWeatherRecord, ApplicationError>;
}

/// Configuration for the alternative-date search
#[derive(Debug, Clone)]
pub struct AlternativeSearchConfig {
    /// Window used when the caller does not name one
    pub default_window_days: u32,
    /// Maximum lookups in flight at once
    pub max_concurrent_lookups: usize,
    /// Upper bound for a single date lookup
    pub lookup_timeout: Duration,
}

impl Default for AlternativeSearchConfig {
    fn default() -> Self {
        Self {
            default_window_days: DEFAULT_WINDOW_DAYS,
            max_concurrent_lookups: 4,
            lookup_timeout: Duration::from_secs(10),
        }
    }
}

/// Ranks candidate dates after an event's planned date
#[derive(Debug, Clone, Default)]
pub struct AlternativeDateSearch {
    scorer: SuitabilityScorer,
    config: AlternativeSearchConfig,
}

impl AlternativeDateSearch {
    #[must_use]
    pub const fn new(scorer: SuitabilityScorer, config: AlternativeSearchConfig) -> Self {
        Self { scorer, config }
    }

    #[must_use]
    pub const fn config(&self) -> &AlternativeSearchConfig {
        &self.config
    }

    /// Score `event.date + 1 ..= event.date + window_days` and rank them
    ///
    /// The result holds at most `window_days` entries with unique dates,
    /// sorted by score descending; equal scores keep ascending date order.
    /// Dates whose lookup fails or times out are omitted.
    #[instrument(skip(self, source, event), fields(event_id = %event.id, location = %event.location))]
    pub async fn find_alternatives<S>(
        &self,
        source: &S,
        event: &Event,
        window_days: u32,
    ) -> Vec<AlternativeDate>
    where
        S: DailyWeatherSource + ?Sized,
    {
        let candidates: Vec<NaiveDate> = (1..=window_days)
            .filter_map(|offset| event.date.checked_add_days(Days::new(u64::from(offset))))
            .collect();

        let mut alternatives: Vec<AlternativeDate> = stream::iter(candidates)
            .map(|date| self.score_candidate(source, event, date))
            .buffer_unordered(self.config.max_concurrent_lookups.max(1))
            .filter_map(futures::future::ready)
            .collect()
            .await;

        alternatives.sort_by_key(|alt| alt.date);
        alternatives.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            candidates = window_days,
            found = alternatives.len(),
            "Alternative date search finished"
        );
        alternatives
    }

    async fn score_candidate<S>(
        &self,
        source: &S,
        event: &Event,
        date: NaiveDate,
    ) -> Option<AlternativeDate>
    where
        S: DailyWeatherSource + ?Sized,
    {
        let lookup = source.weather_for_date(&event.location, date);
        let record = match tokio::time::timeout(self.config.lookup_timeout, lookup).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                debug!(%date, error = %e, "Could not get weather for candidate date");
                return None;
            },
            Err(_) => {
                debug!(%date, timeout = ?self.config.lookup_timeout, "Weather lookup timed out");
                return None;
            },
        };

        match self.scorer.analyze(&event.on_date(date), &record) {
            Ok(analysis) => Some(AlternativeDate::from_analysis(&analysis)),
            Err(e) => {
                debug!(%date, error = %e, "Could not score candidate date");
                None
            },
        }
    }
}

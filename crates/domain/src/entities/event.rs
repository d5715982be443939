//! Event entity - a planned outdoor event at a location and date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::SuitabilityAnalysis;
use crate::value_objects::{EventId, EventType};

/// A planned outdoor event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Free-form location understood by the weather provider (e.g. "London,GB")
    pub location: String,
    /// Calendar date of the event
    pub date: NaiveDate,
    /// Kind of event, selects the requirement profile
    pub event_type: EventType,
    /// Optional description
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Most recent weather analysis, if one succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_analysis: Option<SuitabilityAnalysis>,
}

impl Event {
    /// Create a new event without a weather analysis
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        date: NaiveDate,
        event_type: EventType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EventId::new(),
            name: name.into(),
            location: location.into(),
            date,
            event_type,
            description: String::new(),
            created_at: now,
            updated_at: now,
            weather_analysis: None,
        }
    }

    /// Set a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Same event moved to another date, keeping identity
    ///
    /// Used to score candidate dates without touching the stored event.
    #[must_use]
    pub fn on_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            weather_analysis: None,
            ..self.clone()
        }
    }

    /// Apply a partial update
    ///
    /// `id` and `created_at` never change; `updated_at` is bumped.
    pub fn apply_update(&mut self, update: EventUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(event_type) = update.event_type {
            self.event_type = event_type;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }

    /// Attach a fresh analysis
    pub fn set_analysis(&mut self, analysis: SuitabilityAnalysis) {
        self.weather_analysis = Some(analysis);
    }
}

/// Partial update for an event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub event_type: Option<EventType>,
    pub description: Option<String>,
}

impl EventUpdate {
    /// Whether the update changes inputs to the weather lookup
    #[must_use]
    pub const fn touches_weather(&self) -> bool {
        self.location.is_some() || self.date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn new_event_has_no_analysis() {
        let event = Event::new("Picnic", "Berlin", date(1), EventType::General);
        assert!(event.weather_analysis.is_none());
        assert_eq!(event.created_at, event.updated_at);
        assert!(event.description.is_empty());
    }

    #[test]
    fn apply_update_changes_only_given_fields() {
        let mut event = Event::new("Picnic", "Berlin", date(1), EventType::General)
            .with_description("family");
        let id = event.id;
        let created = event.created_at;

        event.apply_update(EventUpdate {
            name: Some("Big Picnic".to_string()),
            ..Default::default()
        });

        assert_eq!(event.id, id);
        assert_eq!(event.created_at, created);
        assert_eq!(event.name, "Big Picnic");
        assert_eq!(event.location, "Berlin");
        assert_eq!(event.description, "family");
        assert!(event.updated_at >= created);
    }

    #[test]
    fn touches_weather_on_location_or_date() {
        assert!(!EventUpdate::default().touches_weather());
        assert!(
            EventUpdate {
                location: Some("Rome".to_string()),
                ..Default::default()
            }
            .touches_weather()
        );
        assert!(
            EventUpdate {
                date: Some(date(3)),
                ..Default::default()
            }
            .touches_weather()
        );
        assert!(
            !EventUpdate {
                name: Some("x".to_string()),
                event_type: Some(EventType::Hiking),
                ..Default::default()
            }
            .touches_weather()
        );
    }

    #[test]
    fn on_date_keeps_identity() {
        let event = Event::new("Run", "Oslo", date(1), EventType::OutdoorSports);
        let moved = event.on_date(date(5));
        assert_eq!(moved.id, event.id);
        assert_eq!(moved.date, date(5));
        assert_eq!(event.date, date(1));
    }

    #[test]
    fn serializes_camel_case() {
        let event = Event::new("Run", "Oslo", date(1), EventType::OutdoorSports);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "outdoor_sports");
        assert_eq!(json["date"], "2026-08-01");
        assert!(json.get("weatherAnalysis").is_none());
    }
}

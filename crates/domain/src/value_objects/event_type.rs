//! Event type value object and its weather requirement profiles
//!
//! Each event type maps to a static [`EventRequirements`] profile. Unknown
//! type keys fall back to [`EventType::General`].
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::EventType;
//!
//! let wedding = EventType::from_key("wedding");
//! assert_eq!(wedding.requirements().max_precipitation, 10);
//!
//! // Unrecognized keys use the general profile
//! assert_eq!(EventType::from_key("concert"), EventType::General);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WeatherCondition;
use crate::errors::DomainError;

/// Inclusive ideal temperature range in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    /// Check whether `value` lies within `[min - margin, max + margin]`
    #[must_use]
    pub fn contains_with_margin(&self, value: f64, margin: f64) -> bool {
        value >= self.min - margin && value <= self.max + margin
    }
}

/// Weather tolerances for one kind of event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRequirements {
    /// Display name of the profile
    pub name: &'static str,
    /// Ideal temperature range
    pub ideal_temp: TemperatureRange,
    /// Highest acceptable precipitation probability in percent
    pub max_precipitation: u8,
    /// Highest acceptable wind speed in km/h
    pub max_wind_speed: f64,
    /// Conditions the event is comfortable with
    pub preferred_conditions: &'static [WeatherCondition],
}

impl EventRequirements {
    /// Whether `condition` is in the preferred list
    #[must_use]
    pub fn prefers(&self, condition: &WeatherCondition) -> bool {
        self.preferred_conditions.contains(condition)
    }
}

const CLEAR_OR_CLOUDS: &[WeatherCondition] = &[WeatherCondition::Clear, WeatherCondition::Clouds];

static OUTDOOR_SPORTS: EventRequirements = EventRequirements {
    name: "Outdoor Sports",
    ideal_temp: TemperatureRange {
        min: 15.0,
        max: 30.0,
    },
    max_precipitation: 20,
    max_wind_speed: 20.0,
    preferred_conditions: CLEAR_OR_CLOUDS,
};

static WEDDING: EventRequirements = EventRequirements {
    name: "Wedding/Formal Event",
    ideal_temp: TemperatureRange {
        min: 18.0,
        max: 28.0,
    },
    max_precipitation: 10,
    max_wind_speed: 15.0,
    preferred_conditions: CLEAR_OR_CLOUDS,
};

static HIKING: EventRequirements = EventRequirements {
    name: "Hiking/Outdoor Adventure",
    ideal_temp: TemperatureRange {
        min: 10.0,
        max: 25.0,
    },
    max_precipitation: 30,
    max_wind_speed: 25.0,
    preferred_conditions: &[
        WeatherCondition::Clear,
        WeatherCondition::Clouds,
        WeatherCondition::Mist,
    ],
};

static CORPORATE_OUTDOOR: EventRequirements = EventRequirements {
    name: "Corporate Outdoor Event",
    ideal_temp: TemperatureRange {
        min: 16.0,
        max: 26.0,
    },
    max_precipitation: 15,
    max_wind_speed: 18.0,
    preferred_conditions: CLEAR_OR_CLOUDS,
};

static GENERAL: EventRequirements = EventRequirements {
    name: "General Outdoor Event",
    ideal_temp: TemperatureRange {
        min: 15.0,
        max: 28.0,
    },
    max_precipitation: 25,
    max_wind_speed: 20.0,
    preferred_conditions: CLEAR_OR_CLOUDS,
};

/// Kind of outdoor event being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Outdoor sports
    OutdoorSports,
    /// Wedding or formal event
    Wedding,
    /// Hiking or outdoor adventure
    Hiking,
    /// Corporate outdoor event
    CorporateOutdoor,
    /// Anything else
    #[default]
    General,
}

impl EventType {
    /// All known event types
    pub const ALL: [Self; 5] = [
        Self::OutdoorSports,
        Self::Wedding,
        Self::Hiking,
        Self::CorporateOutdoor,
        Self::General,
    ];

    /// Resolve a type key, falling back to `General` for unknown keys
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or(Self::General)
    }

    /// Stable string key
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::OutdoorSports => "outdoor_sports",
            Self::Wedding => "wedding",
            Self::Hiking => "hiking",
            Self::CorporateOutdoor => "corporate_outdoor",
            Self::General => "general",
        }
    }

    /// Requirement profile for this event type
    #[must_use]
    pub fn requirements(&self) -> &'static EventRequirements {
        match self {
            Self::OutdoorSports => &OUTDOOR_SPORTS,
            Self::Wedding => &WEDDING,
            Self::Hiking => &HIKING,
            Self::CorporateOutdoor => &CORPORATE_OUTDOOR,
            Self::General => &GENERAL,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "eventType must be one of outdoor_sports, wedding, hiking, corporate_outdoor, general (got '{s}')"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_parse() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.key().parse::<EventType>().unwrap(), event_type);
        }
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "picnic".parse::<EventType>().unwrap_err();
        assert!(err.to_string().contains("picnic"));
    }

    #[test]
    fn from_key_falls_back_to_general() {
        assert_eq!(EventType::from_key("picnic"), EventType::General);
        assert_eq!(EventType::from_key(""), EventType::General);
        assert_eq!(EventType::from_key("hiking"), EventType::Hiking);
    }

    #[test]
    fn wedding_profile() {
        let req = EventType::Wedding.requirements();
        assert_eq!(req.name, "Wedding/Formal Event");
        assert!((req.ideal_temp.min - 18.0).abs() < f64::EPSILON);
        assert!((req.ideal_temp.max - 28.0).abs() < f64::EPSILON);
        assert_eq!(req.max_precipitation, 10);
        assert!((req.max_wind_speed - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_hiking_prefers_mist() {
        for event_type in EventType::ALL {
            let prefers_mist = event_type.requirements().prefers(&WeatherCondition::Mist);
            assert_eq!(prefers_mist, event_type == EventType::Hiking);
        }
    }

    #[test]
    fn every_profile_prefers_clear() {
        for event_type in EventType::ALL {
            assert!(event_type.requirements().prefers(&WeatherCondition::Clear));
        }
    }

    #[test]
    fn temperature_range_margin() {
        let range = TemperatureRange {
            min: 15.0,
            max: 28.0,
        };
        assert!(range.contains_with_margin(15.0, 0.0));
        assert!(!range.contains_with_margin(14.0, 0.0));
        assert!(range.contains_with_margin(10.0, 5.0));
        assert!(range.contains_with_margin(38.0, 10.0));
        assert!(!range.contains_with_margin(38.5, 10.0));
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&EventType::CorporateOutdoor).unwrap();
        assert_eq!(json, "\"corporate_outdoor\"");
        let parsed: EventType = serde_json::from_str("\"outdoor_sports\"").unwrap();
        assert_eq!(parsed, EventType::OutdoorSports);
    }

    #[test]
    fn default_is_general() {
        assert_eq!(EventType::default(), EventType::General);
    }
}

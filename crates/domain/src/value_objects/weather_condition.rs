//! Weather condition value object
//!
//! Condition groups as reported by the forecast provider's "main" label
//! (`Clear`, `Clouds`, `Rain`, ...). Labels outside the known set are kept
//! verbatim in [`WeatherCondition::Other`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dominant weather condition for a timeslot or day
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// Clear sky
    Clear,
    /// Any cloud cover
    Clouds,
    /// Rain
    Rain,
    /// Drizzle
    Drizzle,
    /// Mist
    Mist,
    /// Fog
    Fog,
    /// Haze
    Haze,
    /// Snow
    Snow,
    /// Thunderstorm
    Thunderstorm,
    /// Any other provider label (`Smoke`, `Dust`, `Tornado`, ...)
    #[serde(untagged)]
    Other(String),
}

impl WeatherCondition {
    /// Map a provider label to a condition, keeping unknown labels as `Other`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" => Self::Other("Unknown".to_string()),
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Mist" => Self::Mist,
            "Fog" => Self::Fog,
            "Haze" => Self::Haze,
            "Snow" => Self::Snow,
            "Thunderstorm" => Self::Thunderstorm,
            other => Self::Other(other.to_string()),
        }
    }

    /// Provider label for this condition
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Haze => "Haze",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Other(label) => label,
        }
    }

    /// Reduced-visibility conditions that still allow most outdoor plans
    #[must_use]
    pub const fn is_low_visibility(&self) -> bool {
        matches!(self, Self::Mist | Self::Fog)
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WeatherCondition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(WeatherCondition::from_label("Clear"), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_label("Clouds"), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::from_label("Mist"), WeatherCondition::Mist);
        assert_eq!(
            WeatherCondition::from_label("Thunderstorm"),
            WeatherCondition::Thunderstorm
        );
    }

    #[test]
    fn unknown_label_is_kept() {
        let tornado = WeatherCondition::from_label(" Tornado ");
        assert_eq!(tornado, WeatherCondition::Other("Tornado".to_string()));
        assert_eq!(tornado.to_string(), "Tornado");
        assert_eq!(
            WeatherCondition::from_label(""),
            WeatherCondition::Other("Unknown".to_string())
        );
    }

    #[test]
    fn serializes_as_plain_label() {
        let smoke = WeatherCondition::from_label("Smoke");
        assert_eq!(serde_json::to_string(&smoke).unwrap(), r#""Smoke""#);
        assert_eq!(
            serde_json::to_string(&WeatherCondition::Rain).unwrap(),
            r#""Rain""#
        );

        let parsed: WeatherCondition = serde_json::from_str(r#""Dust""#).unwrap();
        assert_eq!(parsed, WeatherCondition::Other("Dust".to_string()));
        let parsed: WeatherCondition = serde_json::from_str(r#""Fog""#).unwrap();
        assert_eq!(parsed, WeatherCondition::Fog);
    }

    #[test]
    fn label_roundtrips() {
        for condition in [
            WeatherCondition::Clear,
            WeatherCondition::Rain,
            WeatherCondition::Fog,
            WeatherCondition::Snow,
        ] {
            assert_eq!(WeatherCondition::from_label(condition.label()), condition);
        }
        for label in ["Smoke", "Squall"] {
            assert_eq!(WeatherCondition::from_label(label).label(), label);
        }
    }

    #[test]
    fn low_visibility() {
        assert!(WeatherCondition::Mist.is_low_visibility());
        assert!(WeatherCondition::Fog.is_low_visibility());
        assert!(!WeatherCondition::Haze.is_low_visibility());
        assert!(!WeatherCondition::Clear.is_low_visibility());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(WeatherCondition::Clouds.to_string(), "Clouds");
    }
}

//! Timezone value object
//!
//! Reference timezone used to decide what "today" means when resolving
//! requested event dates.

use std::fmt;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated IANA timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA timezone name
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimezone` if the name is not in the IANA database.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// UTC timezone
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// Underlying chrono-tz timezone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// IANA name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Current calendar date in this timezone
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<String> for Timezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iana_names() {
        let tz = Timezone::parse("Europe/Berlin").unwrap();
        assert_eq!(tz.name(), "Europe/Berlin");
        assert_eq!(format!("{tz}"), "Europe/Berlin");
    }

    #[test]
    fn rejects_unknown_names() {
        let err = Timezone::parse("Mars/Olympus").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimezone(_)));
    }

    #[test]
    fn default_is_utc() {
        assert_eq!(Timezone::default().name(), "UTC");
    }

    #[test]
    fn today_matches_utc_date_for_utc() {
        let today = Timezone::utc().today();
        let now = Utc::now().date_naive();
        // Allow a midnight rollover between the two calls
        assert!(today == now || today.succ_opt() == Some(now));
    }

    #[test]
    fn serde_roundtrip() {
        let tz = Timezone::parse("America/New_York").unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"America/New_York\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let result: Result<Timezone, _> = serde_json::from_str("\"Nowhere/City\"");
        assert!(result.is_err());
    }
}

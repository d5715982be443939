//! Date resolver
//!
//! Decides whether a requested date is answered from current conditions or
//! from the forecast window, and rejects dates outside the provider horizon.

use chrono::NaiveDate;
use domain::value_objects::Timezone;
use domain::DomainError;

/// Number of days ahead the forecast covers
pub const FORECAST_HORIZON_DAYS: i64 = 5;

/// How a requested date is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateResolution {
    /// The date is today
    CurrentConditions,
    /// The date lies `horizon_days` ahead, within the forecast window
    ForecastLookup { horizon_days: u8 },
    /// The date is in the past or beyond the forecast window
    Unsupported { horizon_days: i64 },
}

/// Maps requested dates onto lookup strategies relative to "today"
#[derive(Debug, Clone, Copy)]
pub struct DateResolver {
    timezone: Timezone,
    pinned_today: Option<NaiveDate>,
}

impl DateResolver {
    /// Resolver that reads today from the clock in `timezone`
    #[must_use]
    pub const fn new(timezone: Timezone) -> Self {
        Self {
            timezone,
            pinned_today: None,
        }
    }

    /// Resolver with a fixed notion of today
    #[must_use]
    pub const fn pinned(today: NaiveDate) -> Self {
        Self {
            timezone: Timezone::utc(),
            pinned_today: Some(today),
        }
    }

    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Current calendar date in the reference timezone
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| self.timezone.today())
    }

    /// Classify `date` against today
    #[must_use]
    pub fn classify(&self, date: NaiveDate) -> DateResolution {
        Self::classify_on(date, self.today())
    }

    /// Classify `date` against an explicit `today`
    ///
    /// The horizon is the whole-day calendar difference, so the time of day
    /// never affects the result.
    #[must_use]
    pub fn classify_on(date: NaiveDate, today: NaiveDate) -> DateResolution {
        let horizon_days = (date - today).num_days();
        match horizon_days {
            0 => DateResolution::CurrentConditions,
            1..=FORECAST_HORIZON_DAYS => DateResolution::ForecastLookup {
                horizon_days: u8::try_from(horizon_days).unwrap_or(u8::MAX),
            },
            _ => DateResolution::Unsupported { horizon_days },
        }
    }

    /// Classify `date`, failing for unsupported dates
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDateRange` for past dates and dates more than
    /// five days ahead.
    pub fn resolve(&self, date: NaiveDate) -> Result<DateResolution, DomainError> {
        match self.classify(date) {
            DateResolution::Unsupported { horizon_days } => {
                Err(DomainError::UnsupportedDateRange { date, horizon_days })
            },
            supported => Ok(supported),
        }
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(Timezone::utc())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 30).unwrap()
    }

    #[test]
    fn today_is_current_conditions() {
        assert_eq!(
            DateResolver::classify_on(today(), today()),
            DateResolution::CurrentConditions
        );
    }

    #[test]
    fn one_to_five_days_is_forecast() {
        for days in 1..=5u8 {
            let date = today() + Duration::days(i64::from(days));
            assert_eq!(
                DateResolver::classify_on(date, today()),
                DateResolution::ForecastLookup { horizon_days: days }
            );
        }
    }

    #[test]
    fn six_days_out_is_unsupported() {
        let resolver = DateResolver::pinned(today());
        let date = today() + Duration::days(6);
        match resolver.resolve(date) {
            Err(DomainError::UnsupportedDateRange { horizon_days, .. }) => {
                assert_eq!(horizon_days, 6);
            },
            other => unreachable!("Expected UnsupportedDateRange, got {other:?}"),
        }
    }

    #[test]
    fn past_dates_are_unsupported() {
        let resolver = DateResolver::pinned(today());
        let yesterday = today() - Duration::days(1);
        assert_eq!(
            resolver.classify(yesterday),
            DateResolution::Unsupported { horizon_days: -1 }
        );
        assert!(resolver.resolve(yesterday).is_err());
    }

    #[test]
    fn crosses_month_boundary() {
        // 2026-03-30 + 3 days = 2026-04-02
        let date = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        assert_eq!(
            DateResolver::classify_on(date, today()),
            DateResolution::ForecastLookup { horizon_days: 3 }
        );
    }

    #[test]
    fn pinned_resolver_reports_pinned_today() {
        let resolver = DateResolver::pinned(today());
        assert_eq!(resolver.today(), today());
        assert_eq!(resolver.resolve(today()).ok(), Some(DateResolution::CurrentConditions));
    }

    #[test]
    fn clock_resolver_uses_timezone() {
        let tz = Timezone::parse("Pacific/Kiritimati").unwrap();
        let resolver = DateResolver::new(tz);
        assert_eq!(resolver.today(), tz.today());
        assert_eq!(resolver.timezone(), tz);
    }
}

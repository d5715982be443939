//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{NaiveDate, Utc};
use domain::entities::DailyWeatherRecord;
use domain::value_objects::{EventType, SuitabilityRating, Timezone, WeatherCondition};
use proptest::prelude::*;

// ============================================================================
// SuitabilityRating Property Tests
// ============================================================================

mod rating_tests {
    use super::*;

    proptest! {
        #[test]
        fn rating_is_monotonic(a in 0u32..=110, b in 0u32..=110) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let rank = |r: SuitabilityRating| match r {
                SuitabilityRating::Poor => 0,
                SuitabilityRating::Okay => 1,
                SuitabilityRating::Good => 2,
                SuitabilityRating::Excellent => 3,
            };
            prop_assert!(rank(SuitabilityRating::from_score(low)) <= rank(SuitabilityRating::from_score(high)));
        }

        #[test]
        fn excellent_from_threshold_up(score in 80u32..=110) {
            prop_assert_eq!(SuitabilityRating::from_score(score), SuitabilityRating::Excellent);
        }

        #[test]
        fn poor_below_forty(score in 0u32..40) {
            prop_assert_eq!(SuitabilityRating::from_score(score), SuitabilityRating::Poor);
        }
    }
}

// ============================================================================
// EventType Property Tests
// ============================================================================

mod event_type_tests {
    use super::*;

    proptest! {
        #[test]
        fn unknown_keys_fall_back_to_general(key in "[a-z]{1,12}") {
            let is_known = EventType::ALL.iter().any(|t| t.key() == key);
            prop_assume!(!is_known);
            prop_assert_eq!(EventType::from_key(&key), EventType::General);
        }

        #[test]
        fn unknown_keys_rejected_by_strict_parse(key in "[A-Z][a-z]{0,10}") {
            prop_assert!(key.parse::<EventType>().is_err());
        }
    }

    #[test]
    fn known_keys_roundtrip() {
        for event_type in EventType::ALL {
            assert_eq!(EventType::from_key(event_type.key()), event_type);
            assert_eq!(event_type.key().parse::<EventType>().ok(), Some(event_type));
        }
    }

    #[test]
    fn every_profile_has_sane_ranges() {
        for event_type in EventType::ALL {
            let req = event_type.requirements();
            assert!(req.ideal_temp.min < req.ideal_temp.max);
            assert!(req.max_precipitation <= 100);
            assert!(req.max_wind_speed > 0.0);
            assert!(!req.preferred_conditions.is_empty());
        }
    }
}

// ============================================================================
// WeatherCondition Property Tests
// ============================================================================

mod weather_condition_tests {
    use super::*;

    proptest! {
        #[test]
        fn any_label_parses(label in "\\PC{0,20}") {
            // Parsing never fails; unknown labels map to Other
            let parsed: Result<WeatherCondition, _> = label.parse();
            prop_assert!(parsed.is_ok());
        }
    }
}

// ============================================================================
// DailyWeatherRecord Property Tests
// ============================================================================

mod weather_record_tests {
    use super::*;

    fn record(temp: f64, spread: f64, wind: f64, prob: u8) -> DailyWeatherRecord {
        DailyWeatherRecord {
            location: "Lisbon".to_string(),
            country: Some("PT".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap_or_default(),
            temperature: temp,
            min_temperature: temp - spread,
            max_temperature: temp + spread,
            humidity: 50,
            wind_speed: wind,
            cloudiness: 20,
            precipitation: 0.0,
            precipitation_probability: prob,
            condition: WeatherCondition::Clear,
            description: "clear sky".to_string(),
            retrieved_at: Utc::now(),
        }
    }

    proptest! {
        #[test]
        fn well_formed_records_validate(
            temp in -40.0f64..50.0,
            spread in 0.0f64..10.0,
            wind in 0.0f64..150.0,
            prob in 0u8..=100
        ) {
            prop_assert!(record(temp, spread, wind, prob).validate().is_ok());
        }

        #[test]
        fn out_of_range_probability_rejected(prob in 101u8..=255) {
            prop_assert!(record(20.0, 2.0, 5.0, prob).validate().is_err());
        }

        #[test]
        fn negative_wind_rejected(wind in -100.0f64..-0.001) {
            prop_assert!(record(20.0, 2.0, wind, 10).validate().is_err());
        }
    }
}

// ============================================================================
// Timezone Tests
// ============================================================================

mod timezone_tests {
    use super::*;

    #[test]
    fn common_zones_parse() {
        for name in ["UTC", "Europe/Berlin", "America/New_York", "Asia/Tokyo"] {
            let tz = Timezone::parse(name);
            assert!(tz.is_ok(), "{name} should parse");
        }
    }

    proptest! {
        #[test]
        fn garbage_zones_rejected(name in "[a-z]{3,8}/[a-z]{3,8}") {
            prop_assert!(Timezone::parse(&name).is_err());
        }
    }
}

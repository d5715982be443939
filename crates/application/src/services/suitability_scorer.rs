//! Suitability scorer
//!
//! Rule-based scoring of a day's weather against an event type's
//! requirement profile. Four independent factors are scored and summed:
//!
//! | factor        | Perfect | Good | Fair | Poor |
//! |---------------|---------|------|------|------|
//! | temperature   | 30      | 20   | 10   | 0    |
//! | precipitation | 30      | 25   | 15   | 0    |
//! | wind          | 25      | 20   | 10   | 0    |
//! | conditions    | 25      | 20   | 10   | 0    |
//!
//! The total (0-110) is bucketed with [`SuitabilityRating::from_score`].

use chrono::Utc;
use domain::entities::{DailyWeatherRecord, Event, FactorResult, Factors, SuitabilityAnalysis};
use domain::value_objects::{
    EventRequirements, EventType, FactorStatus, SuitabilityRating, WeatherCondition,
};
use domain::DomainError;

/// Margin around the ideal temperature range still scored `Good`
const TEMP_GOOD_MARGIN: f64 = 5.0;
/// Margin around the ideal temperature range still scored `Fair`
const TEMP_FAIR_MARGIN: f64 = 10.0;
/// Precipitation probability at or below which rain is negligible
const MINIMAL_PRECIPITATION: u8 = 10;
/// Extra precipitation probability over the maximum still scored `Fair`
const PRECIPITATION_FAIR_MARGIN: u8 = 20;
/// Wind speed at or below which wind is negligible (km/h)
const LIGHT_WIND: f64 = 10.0;
/// Extra wind speed over the maximum still scored `Fair` (km/h)
const WIND_FAIR_MARGIN: f64 = 10.0;

/// Stateless scorer for event weather suitability
#[derive(Debug, Clone, Copy, Default)]
pub struct SuitabilityScorer;

impl SuitabilityScorer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Score a record against the requirement profile of `event_type`
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeatherRecord` when the record fails validation.
    pub fn score(
        &self,
        event_type: EventType,
        record: &DailyWeatherRecord,
    ) -> Result<SuitabilityAnalysis, DomainError> {
        record.validate()?;

        let requirements = event_type.requirements();
        let factors = Factors {
            temperature: score_temperature(requirements, record.temperature),
            precipitation: score_precipitation(
                requirements,
                record.precipitation_probability,
                record.precipitation,
            ),
            wind: score_wind(requirements, record.wind_speed),
            conditions: score_conditions(requirements, &record.condition),
        };
        let score = factors.total();
        let recommendations = recommendations(requirements, record, &factors);

        Ok(SuitabilityAnalysis {
            event_id: None,
            event_name: None,
            event_type,
            location: record.location.clone(),
            date: record.date,
            score,
            rating: SuitabilityRating::from_score(score),
            factors,
            recommendations,
            weather: record.clone(),
            generated_at: Utc::now(),
        })
    }

    /// Score a record for a specific event
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeatherRecord` when the record fails validation.
    pub fn analyze(
        &self,
        event: &Event,
        record: &DailyWeatherRecord,
    ) -> Result<SuitabilityAnalysis, DomainError> {
        let mut analysis = self.score(event.event_type, record)?;
        analysis.event_id = Some(event.id);
        analysis.event_name = Some(event.name.clone());
        analysis.location.clone_from(&event.location);
        analysis.date = event.date;
        Ok(analysis)
    }
}

fn score_temperature(requirements: &EventRequirements, temperature: f64) -> FactorResult {
    let range = requirements.ideal_temp;
    let profile = requirements.name.to_lowercase();

    let (score, status, message) = if range.contains_with_margin(temperature, 0.0) {
        (
            30,
            FactorStatus::Perfect,
            format!("Temperature {temperature}°C is ideal for {profile}"),
        )
    } else if range.contains_with_margin(temperature, TEMP_GOOD_MARGIN) {
        (
            20,
            FactorStatus::Good,
            format!("Temperature {temperature}°C is acceptable for {profile}"),
        )
    } else if range.contains_with_margin(temperature, TEMP_FAIR_MARGIN) {
        (
            10,
            FactorStatus::Fair,
            format!("Temperature {temperature}°C is manageable but not ideal"),
        )
    } else {
        let verdict = if temperature < range.min {
            "too cold"
        } else {
            "too hot"
        };
        (
            0,
            FactorStatus::Poor,
            format!("Temperature {temperature}°C is {verdict} for outdoor events"),
        )
    };

    FactorResult::new(score, status, message, temperature, "°C")
}

fn score_precipitation(
    requirements: &EventRequirements,
    probability: u8,
    amount: f64,
) -> FactorResult {
    let max = requirements.max_precipitation;

    let (score, status, message) = if probability <= max && probability <= MINIMAL_PRECIPITATION {
        (
            30,
            FactorStatus::Perfect,
            "Minimal chance of rain - perfect for outdoor events".to_string(),
        )
    } else if probability <= max {
        (
            25,
            FactorStatus::Good,
            format!("Low chance of rain ({probability}%) - good for outdoor events"),
        )
    } else if u16::from(probability) <= u16::from(max) + u16::from(PRECIPITATION_FAIR_MARGIN) {
        (
            15,
            FactorStatus::Fair,
            format!("Moderate chance of rain ({probability}%) - have backup plans ready"),
        )
    } else {
        (
            0,
            FactorStatus::Poor,
            format!(
                "High chance of rain ({probability}%) - consider rescheduling or indoor alternatives"
            ),
        )
    };

    FactorResult::new(score, status, message, f64::from(probability), "%").with_amount(amount)
}

fn score_wind(requirements: &EventRequirements, wind_speed: f64) -> FactorResult {
    let max = requirements.max_wind_speed;

    let (score, status, message) = if wind_speed <= max && wind_speed <= LIGHT_WIND {
        (
            25,
            FactorStatus::Perfect,
            "Light winds - ideal conditions".to_string(),
        )
    } else if wind_speed <= max {
        (
            20,
            FactorStatus::Good,
            format!("Moderate winds ({wind_speed} km/h) - acceptable for most activities"),
        )
    } else if wind_speed <= max + WIND_FAIR_MARGIN {
        (
            10,
            FactorStatus::Fair,
            format!("Strong winds ({wind_speed} km/h) - may affect some activities"),
        )
    } else {
        (
            0,
            FactorStatus::Poor,
            format!("Very strong winds ({wind_speed} km/h) - not recommended for outdoor events"),
        )
    };

    FactorResult::new(score, status, message, wind_speed, "km/h")
}

fn score_conditions(requirements: &EventRequirements, condition: &WeatherCondition) -> FactorResult {
    let (score, status, message) = if requirements.prefers(condition) {
        if *condition == WeatherCondition::Clear {
            (
                25,
                FactorStatus::Perfect,
                "Clear skies - perfect weather conditions".to_string(),
            )
        } else {
            (
                20,
                FactorStatus::Good,
                format!("{condition} conditions - good for outdoor events"),
            )
        }
    } else if condition.is_low_visibility() {
        (
            10,
            FactorStatus::Fair,
            format!("{condition} conditions - reduced visibility but manageable"),
        )
    } else {
        (
            0,
            FactorStatus::Poor,
            format!("{condition} conditions - not ideal for outdoor events"),
        )
    };

    FactorResult::new(score, status, message, condition.clone(), "")
}

/// Advice in fixed category order: temperature, precipitation, wind, conditions
fn recommendations(
    requirements: &EventRequirements,
    record: &DailyWeatherRecord,
    factors: &Factors,
) -> Vec<String> {
    let mut advice: Vec<&str> = Vec::new();

    if factors.temperature.status == FactorStatus::Poor {
        if record.temperature < requirements.ideal_temp.min {
            advice.extend([
                "Consider warmer clothing or heating arrangements",
                "Schedule the event during warmer parts of the day (noon-afternoon)",
            ]);
        } else {
            advice.extend([
                "Provide shade and cooling arrangements",
                "Consider morning or evening timing to avoid peak heat",
            ]);
        }
    }

    if factors.precipitation.status.is_poor_or_fair() {
        advice.extend([
            "Have covered areas or tents ready",
            "Consider indoor backup venue",
            "Inform attendees to bring rain gear",
        ]);
    }

    if factors.wind.status.is_poor_or_fair() {
        advice.extend([
            "Secure all decorations and equipment",
            "Consider windbreaks or sheltered areas",
            "Inform attendees about windy conditions",
        ]);
    }

    if factors.conditions.status == FactorStatus::Poor {
        advice.extend([
            "Monitor weather updates closely",
            "Have contingency plans ready",
            "Consider postponing if conditions worsen",
        ]);
    }

    if advice.is_empty() {
        advice.extend([
            "Weather conditions look great for your event!",
            "Continue with your planned arrangements",
        ]);
    }

    advice.into_iter().map(String::from).collect()
}

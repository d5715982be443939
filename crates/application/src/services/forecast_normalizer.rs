//! Forecast normalizer
//!
//! Turns raw provider timeslots into one [`DailyWeatherRecord`] per calendar
//! date, and raw current conditions into a record for today.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use domain::entities::DailyWeatherRecord;
use domain::value_objects::WeatherCondition;
use domain::DomainError;

use crate::ports::{ForecastSlot, RawCurrentWeather, RawForecast};

/// Conversion factor from m/s to km/h
const MS_TO_KMH: f64 = 3.6;

/// Round half up, matching the provider-facing display convention
/// (`-2.5` rounds to `-2`, `2.5` to `3`).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 100.0) as u8
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Aggregate a forecast window into daily records, ascending by date
///
/// Slots are grouped by the calendar date of their timestamp shifted into
/// the location's local time.
///
/// # Errors
///
/// Returns `EmptyForecastData` for a window without slots and
/// `InvalidWeatherRecord` when an aggregate holds non-finite values.
pub fn normalize_forecast(raw: &RawForecast) -> Result<Vec<DailyWeatherRecord>, DomainError> {
    if raw.slots.is_empty() {
        return Err(DomainError::EmptyForecastData);
    }

    let offset = FixedOffset::east_opt(raw.utc_offset_secs).unwrap_or_else(|| Utc.fix());
    let retrieved_at = Utc::now();

    let mut days: BTreeMap<NaiveDate, Vec<&ForecastSlot>> = BTreeMap::new();
    for slot in &raw.slots {
        let date = slot.timestamp.with_timezone(&offset).date_naive();
        days.entry(date).or_default().push(slot);
    }

    days.into_iter()
        .map(|(date, slots)| aggregate_day(raw, date, &slots, retrieved_at))
        .collect()
}

fn aggregate_day(
    raw: &RawForecast,
    date: NaiveDate,
    slots: &[&ForecastSlot],
    retrieved_at: DateTime<Utc>,
) -> Result<DailyWeatherRecord, DomainError> {
    let temperature = round_half_up(mean(slots.iter().map(|s| s.temperature)));
    let min_temperature = round_half_up(
        slots
            .iter()
            .map(|s| s.temperature)
            .fold(f64::INFINITY, f64::min),
    );
    let max_temperature = round_half_up(
        slots
            .iter()
            .map(|s| s.temperature)
            .fold(f64::NEG_INFINITY, f64::max),
    );

    let wet_slots = slots.iter().filter(|s| s.precipitation > 0.0).count();
    #[allow(clippy::cast_precision_loss)]
    let precipitation_probability = percent(100.0 * wet_slots as f64 / slots.len() as f64);

    let (condition, description) = dominant_condition(slots);

    let record = DailyWeatherRecord {
        location: raw.location.clone(),
        country: raw.country.clone(),
        date,
        temperature,
        min_temperature,
        max_temperature,
        humidity: percent(mean(slots.iter().map(|s| f64::from(s.humidity)))),
        wind_speed: round_half_up(mean(slots.iter().map(|s| s.wind_speed * MS_TO_KMH))),
        cloudiness: percent(mean(slots.iter().map(|s| f64::from(s.cloudiness)))),
        precipitation: slots.iter().map(|s| s.precipitation).sum(),
        precipitation_probability,
        condition,
        description,
        retrieved_at,
    };
    record.validate()?;
    Ok(record)
}

/// Most frequent condition label; ties go to the label seen first
fn dominant_condition(slots: &[&ForecastSlot]) -> (WeatherCondition, String) {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for slot in slots {
        match counts.iter_mut().find(|(label, _)| *label == slot.condition) {
            Some((_, count)) => *count += 1,
            None => counts.push((&slot.condition, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }

    let label = best.map_or("", |(label, _)| label);
    let description = slots
        .iter()
        .find(|s| s.condition == label)
        .map(|s| s.description.clone())
        .unwrap_or_default();

    (WeatherCondition::from_label(label), description)
}

/// Build today's record from current conditions
///
/// Current observations carry no precipitation probability, so it is 0.
/// Precipitation uses the 1h volume, falling back to 3h, then 0.
///
/// # Errors
///
/// Returns `InvalidWeatherRecord` when the observation holds non-finite values.
pub fn normalize_current(
    raw: &RawCurrentWeather,
    today: NaiveDate,
) -> Result<DailyWeatherRecord, DomainError> {
    let temperature = round_half_up(raw.temperature);
    let record = DailyWeatherRecord {
        location: raw.location.clone(),
        country: raw.country.clone(),
        date: today,
        temperature,
        min_temperature: round_half_up(raw.temperature_min).min(temperature),
        max_temperature: round_half_up(raw.temperature_max).max(temperature),
        humidity: raw.humidity,
        wind_speed: round_half_up(raw.wind_speed * MS_TO_KMH),
        cloudiness: raw.cloudiness,
        precipitation: raw.rain_1h.or(raw.rain_3h).unwrap_or(0.0),
        precipitation_probability: 0,
        condition: WeatherCondition::from_label(&raw.condition),
        description: raw.description.clone(),
        retrieved_at: Utc::now(),
    };
    record.validate()?;
    Ok(record)
}

//! Domain entities - Objects with identity and lifecycle

mod event;
mod suitability;
mod weather_record;

pub use event::{Event, EventUpdate};
pub use suitability::{
    AlternativeDate, FactorResult, FactorValue, Factors, SuitabilityAnalysis, WeatherSummary,
};
pub use weather_record::DailyWeatherRecord;

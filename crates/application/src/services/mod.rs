//! Application services - Use case implementations

mod alternative_dates;
mod date_resolver;
mod event_planner_service;
mod forecast_normalizer;
mod suitability_scorer;
mod weather_cache;
mod weather_service;

pub use alternative_dates::{
    AlternativeDateSearch, AlternativeSearchConfig, DEFAULT_WINDOW_DAYS, DailyWeatherSource,
};
pub use date_resolver::{DateResolution, DateResolver, FORECAST_HORIZON_DAYS};
pub use event_planner_service::{
    AlternativesReport, EventPlannerService, EventWithStatus, MAX_WINDOW_DAYS, NewEvent,
    WeatherStatus,
};
pub use forecast_normalizer::{normalize_current, normalize_forecast};
pub use suitability_scorer::SuitabilityScorer;
pub use weather_cache::{
    CacheKey, CacheKind, CacheStats, CachedWeather, DEFAULT_TTL, WeatherCache,
};
pub use weather_service::{MAX_FORECAST_DAYS, WeatherService};

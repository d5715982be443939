//! Application state shared across handlers

use std::sync::Arc;

use application::{
    AlternativeDateSearch, ApplicationError, DateResolver, EventPlannerService, EventStore,
    SuitabilityScorer, WeatherCache, WeatherProviderPort, WeatherService,
};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Event use cases
    pub planner: Arc<EventPlannerService>,
    /// Direct weather lookups and cache statistics
    pub weather: Arc<WeatherService>,
}

impl AppState {
    /// State around an existing planner; weather lookups share its service
    pub fn new(planner: Arc<EventPlannerService>) -> Self {
        let weather = Arc::clone(planner.weather());
        Self { planner, weather }
    }

    /// Wire the services from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown timezone.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn WeatherProviderPort>,
        store: Arc<dyn EventStore>,
    ) -> Result<Self, ApplicationError> {
        let cache = Arc::new(WeatherCache::new(config.cache_ttl()));
        let resolver = DateResolver::new(config.timezone()?);
        let weather = Arc::new(WeatherService::new(provider, cache, resolver));
        let search = AlternativeDateSearch::new(SuitabilityScorer::new(), config.alternative_search());

        Ok(Self::new(Arc::new(EventPlannerService::new(
            store, weather, search,
        ))))
    }
}

//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{error::ApiError, handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing and health
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Events
        .route(
            "/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/events/{id}",
            get(handlers::events::get_event)
                .put(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route(
            "/events/{id}/weather-check",
            post(handlers::events::weather_check),
        )
        .route(
            "/events/{id}/alternatives",
            get(handlers::events::alternatives),
        )
        .route(
            "/events/{id}/suitability",
            get(handlers::events::suitability),
        )
        // Weather
        .route("/weather/cache/status", get(handlers::weather::cache_status))
        .route(
            "/weather/{location}/current",
            get(handlers::weather::current_weather),
        )
        .route(
            "/weather/{location}/forecast",
            get(handlers::weather::forecast),
        )
        .route(
            "/weather/{location}/{date}",
            get(handlers::weather::weather_for_date),
        )
        .fallback(|| async { ApiError::NotFound("Route not found".to_string()) })
        .with_state(state)
}

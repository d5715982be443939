//! Event planner HTTP presentation layer
//!
//! Axum routes over the event planner and weather services, request
//! validation, and the background cache sweep.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::ValidatedJson;
pub use routes::create_router;
pub use state::AppState;
pub use tasks::{drain_deadline, spawn_cache_sweep_task};

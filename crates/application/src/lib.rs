//! Application layer - Use cases and orchestration
//!
//! Contains the weather pipeline (date resolution, caching, normalization,
//! scoring, alternative-date search), the event planner use cases, and the
//! port definitions adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

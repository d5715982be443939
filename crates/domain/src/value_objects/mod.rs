//! Value Objects - Immutable, identity-less domain primitives

mod event_id;
mod event_type;
mod rating;
mod timezone;
mod weather_condition;

pub use event_id::EventId;
pub use event_type::{EventRequirements, EventType, TemperatureRange};
pub use rating::{FactorStatus, SuitabilityRating};
pub use timezone::Timezone;
pub use weather_condition::WeatherCondition;

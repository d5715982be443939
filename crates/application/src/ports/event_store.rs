//! Event storage port
//!
//! Defines the interface for persisting and retrieving planned events.

use async_trait::async_trait;
use domain::{entities::Event, value_objects::EventId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for event persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert or replace an event
    async fn save(&self, event: &Event) -> Result<(), ApplicationError>;

    /// Get an event by ID
    async fn get(&self, id: &EventId) -> Result<Option<Event>, ApplicationError>;

    /// All events, oldest first
    async fn list(&self) -> Result<Vec<Event>, ApplicationError>;

    /// Delete an event, returning whether it existed
    async fn delete(&self, id: &EventId) -> Result<bool, ApplicationError>;
}

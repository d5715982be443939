//! In-memory event store
//!
//! Implements the `EventStore` port with a lock-protected map. Contents are
//! lost on restart.

use std::collections::HashMap;

use application::{error::ApplicationError, ports::EventStore};
use async_trait::async_trait;
use domain::{entities::Event, value_objects::EventId};
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Event store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn save(&self, event: &Event) -> Result<(), ApplicationError> {
        let replaced = self.events.write().insert(event.id, event.clone()).is_some();
        debug!(replaced, "Saved event");
        Ok(())
    }

    async fn get(&self, id: &EventId) -> Result<Option<Event>, ApplicationError> {
        Ok(self.events.read().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Event>, ApplicationError> {
        let mut events: Vec<Event> = self.events.read().values().cloned().collect();
        events.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_uuid().cmp(&b.id.as_uuid()))
        });
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &EventId) -> Result<bool, ApplicationError> {
        Ok(self.events.write().remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::value_objects::EventType;

    use super::*;

    fn event(name: &str) -> Event {
        Event::new(
            name,
            "Lyon",
            NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            EventType::Wedding,
        )
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryEventStore::new();
        let event = event("Reception");
        store.save(&event).await.unwrap();

        let loaded = store.get(&event.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Reception");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn save_replaces_existing() {
        let store = InMemoryEventStore::new();
        let mut event = event("Reception");
        store.save(&event).await.unwrap();

        event.name = "Dinner".to_string();
        store.save(&event).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&event.id).await.unwrap().unwrap().name, "Dinner");
    }

    #[tokio::test]
    async fn list_is_oldest_first() {
        let store = InMemoryEventStore::new();
        let names = ["first", "second", "third"];
        for name in names {
            store.save(&event(name)).await.unwrap();
        }

        let listed: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(listed, names);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = InMemoryEventStore::new();
        let event = event("Reception");
        store.save(&event).await.unwrap();

        assert!(store.delete(&event.id).await.unwrap());
        assert!(!store.delete(&event.id).await.unwrap());
        assert!(store.get(&event.id).await.unwrap().is_none());
        assert!(store.is_empty());
    }
}

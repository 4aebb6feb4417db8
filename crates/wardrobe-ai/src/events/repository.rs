use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Event, EventId};
use crate::identity::UserId;

/// Per-account event storage.
pub trait EventStore: Send + Sync {
    fn list(&self, owner: &UserId) -> Result<Vec<Event>, EventStoreError>;
    fn insert(&self, owner: &UserId, event: Event) -> Result<Event, EventStoreError>;
    fn remove(&self, owner: &UserId, id: &EventId) -> Result<bool, EventStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EventStoreError {
    #[error("event already exists")]
    Conflict,
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Default, Clone)]
pub struct MemoryEventStore {
    partitions: Arc<Mutex<HashMap<UserId, Vec<Event>>>>,
}

impl MemoryEventStore {
    fn partitions(&self) -> Result<MutexGuard<'_, HashMap<UserId, Vec<Event>>>, EventStoreError> {
        self.partitions
            .lock()
            .map_err(|_| EventStoreError::Unavailable("event store lock poisoned".to_string()))
    }
}

impl EventStore for MemoryEventStore {
    fn list(&self, owner: &UserId) -> Result<Vec<Event>, EventStoreError> {
        Ok(self
            .partitions()?
            .get(owner)
            .cloned()
            .unwrap_or_default())
    }

    fn insert(&self, owner: &UserId, event: Event) -> Result<Event, EventStoreError> {
        let mut partitions = self.partitions()?;
        let events = partitions.entry(owner.clone()).or_default();
        if events.iter().any(|existing| existing.id == event.id) {
            return Err(EventStoreError::Conflict);
        }
        events.push(event.clone());
        Ok(event)
    }

    fn remove(&self, owner: &UserId, id: &EventId) -> Result<bool, EventStoreError> {
        let mut partitions = self.partitions()?;
        let Some(events) = partitions.get_mut(owner) else {
            return Ok(false);
        };
        let before = events.len();
        events.retain(|event| &event.id != id);
        Ok(events.len() != before)
    }
}

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use super::domain::{Event, EventId, NewEvent};
use super::repository::{EventStore, EventStoreError};
use crate::identity::Session;

pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("Please provide event title and date")]
    MissingTitleOrDate,
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error(transparent)]
    Validation(#[from] EventValidationError),
    #[error(transparent)]
    Store(#[from] EventStoreError),
}

/// Calendar operations for the authenticated account.
pub struct EventService<E> {
    store: Arc<E>,
}

impl<E> EventService<E>
where
    E: EventStore + 'static,
{
    pub fn new(store: Arc<E>) -> Self {
        Self { store }
    }

    /// Every event for the session in ascending date order.
    pub fn list(&self, session: &Session) -> Result<Vec<Event>, EventError> {
        let mut events = self.store.list(session.user_id())?;
        events.sort_by_key(|event| event.date);
        Ok(events)
    }

    pub fn add(&self, session: &Session, submission: NewEvent) -> Result<Event, EventError> {
        let title = submission.title.trim();
        let Some(date) = submission.date.filter(|_| !title.is_empty()) else {
            return Err(EventValidationError::MissingTitleOrDate.into());
        };

        let event = Event {
            id: EventId(Uuid::new_v4().to_string()),
            title: title.to_string(),
            date,
            event_type: submission.event_type,
            description: submission
                .description
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        };

        let stored = self.store.insert(session.user_id(), event)?;
        info!(user_id = %session.user_id(), event_id = %stored.id, event_type = stored.event_type.label(), "event added");
        Ok(stored)
    }

    pub fn delete(&self, session: &Session, id: &EventId) -> Result<bool, EventError> {
        let removed = self.store.remove(session.user_id(), id)?;
        if removed {
            info!(user_id = %session.user_id(), event_id = %id, "event deleted");
        }
        Ok(removed)
    }

    /// Events at or after `now`, soonest first.
    pub fn upcoming(
        &self,
        session: &Session,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, EventError> {
        Ok(self
            .list(session)?
            .into_iter()
            .filter(|event| event.date >= now)
            .take(limit)
            .collect())
    }

    /// Events falling on the given UTC calendar day.
    pub fn on_date(&self, session: &Session, date: NaiveDate) -> Result<Vec<Event>, EventError> {
        Ok(self
            .list(session)?
            .into_iter()
            .filter(|event| event.date.date_naive() == date)
            .collect())
    }
}

//! Per-account calendar of dated events.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{Event, EventId, EventType, NewEvent};
pub use repository::{EventStore, EventStoreError, MemoryEventStore};
pub use router::event_router;
pub use service::{EventError, EventService, EventValidationError, DEFAULT_UPCOMING_LIMIT};

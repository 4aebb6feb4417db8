use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for calendar events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Casual,
    Formal,
    Party,
    Festival,
    Work,
    Sport,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Casual => "Casual",
            EventType::Formal => "Formal",
            EventType::Party => "Party",
            EventType::Festival => "Festival",
            EventType::Work => "Work",
            EventType::Sport => "Sport",
        }
    }
}

/// A dated calendar entry. The date is a single instant, never a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Client payload for event creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub description: Option<String>,
}

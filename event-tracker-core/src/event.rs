//! Event types shared by the store, the filter engine and presentation layers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when an event is created.
///
/// Ids come from a per-store counter and are never reused, even after the
/// event they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tracked event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Free text, empty when the user gave no location
    pub location: String,
    pub start: DateTime<Utc>,
    /// Expected to be >= `start`, but never corrected
    pub end: DateTime<Utc>,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Partial update for an existing event.
///
/// Only title and location can change after creation; the time range is
/// fixed for the lifetime of the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventPatch {
    pub fn title(title: impl Into<String>) -> Self {
        EventPatch {
            title: Some(title.into()),
            location: None,
        }
    }

    pub fn location(location: impl Into<String>) -> Self {
        EventPatch {
            title: None,
            location: Some(location.into()),
        }
    }
}

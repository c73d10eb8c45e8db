//! In-memory event storage.
//!
//! The store is the only owner of events. It hands out ids, keeps events in
//! insertion order and applies every mutation atomically: an operation that
//! returns an error has not touched the collection.

use chrono::{DateTime, Utc};

use crate::error::{TrackerError, TrackerResult};
use crate::event::{Event, EventId, EventPatch};

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    /// Last id handed out. Only ever grows, so deleted ids are never reused.
    last_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new event and append it to the store.
    ///
    /// Fails with `Validation` when the title is blank. The title is stored
    /// as given; only the emptiness check trims it.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        location: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Event> {
        let title = title.into();
        validate_title(&title)?;

        self.last_id += 1;
        let event = Event {
            id: EventId(self.last_id),
            title,
            location: location.into(),
            start,
            end,
        };

        tracing::debug!(id = %event.id, title = %event.title, "created event");
        self.events.push(event.clone());

        Ok(event)
    }

    /// Apply a patch to an existing event. Start and end are never touched.
    pub fn update(&mut self, id: EventId, patch: EventPatch) -> TrackerResult<Event> {
        let index = self.position(id)?;

        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }

        let event = &mut self.events[index];
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(location) = patch.location {
            event.location = location;
        }

        tracing::debug!(id = %event.id, title = %event.title, "updated event");
        Ok(event.clone())
    }

    /// Remove an event, returning it. Deleting the same id twice fails.
    pub fn delete(&mut self, id: EventId) -> TrackerResult<Event> {
        let index = self.position(id)?;
        let event = self.events.remove(index);

        tracing::debug!(id = %event.id, "deleted event");
        Ok(event)
    }

    /// Owned copy of all events in insertion order.
    pub fn list(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Borrowed view of all events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: EventId) -> TrackerResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or(TrackerError::NotFound(id))
    }
}

fn validate_title(title: &str) -> TrackerResult<()> {
    if title.trim().is_empty() {
        return Err(TrackerError::Validation(
            "Event title must not be empty".to_string(),
        ));
    }
    Ok(())
}

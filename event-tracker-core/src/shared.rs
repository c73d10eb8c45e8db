//! Lock-guarded event store for callers on more than one thread.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeZone, Utc};

use crate::error::TrackerResult;
use crate::event::{Event, EventId, EventPatch};
use crate::filter::{FilterEngine, FilterMode};
use crate::store::EventStore;

/// Cloneable handle to one [`EventStore`].
///
/// Every mutation runs under the write lock, so id allocation and
/// membership change together. Reads take the read lock and return owned
/// snapshots that later writes cannot affect.
#[derive(Debug, Clone, Default)]
pub struct SharedEventStore {
    inner: Arc<RwLock<EventStore>>,
}

impl SharedEventStore {
    pub fn new(store: EventStore) -> Self {
        SharedEventStore {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn create(
        &self,
        title: impl Into<String>,
        location: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Event> {
        self.write().create(title, location, start, end)
    }

    pub fn update(&self, id: EventId, patch: EventPatch) -> TrackerResult<Event> {
        self.write().update(id, patch)
    }

    pub fn delete(&self, id: EventId) -> TrackerResult<Event> {
        self.write().delete(id)
    }

    pub fn list(&self) -> Vec<Event> {
        self.read().list()
    }

    /// Snapshot of the events matching `mode`, filtered under one read lock.
    pub fn select<Tz: TimeZone>(&self, mode: FilterMode, now: &DateTime<Tz>) -> Vec<Event> {
        let engine = FilterEngine::at(now.clone());
        let store = self.read();
        engine
            .select(store.events(), mode)
            .into_iter()
            .cloned()
            .collect()
    }

    // A panic under the lock can at worst burn an id (a caller's `Into<String>`
    // runs after the counter moves); events and the counter stay consistent.
    fn read(&self) -> RwLockReadGuard<'_, EventStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EventStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Intent/view contract between the core and a presentation layer.
//!
//! A presentation layer turns user actions into [`Intent`]s, applies them to
//! a [`Tracker`] and renders the [`View`] it gets back. It never touches the
//! store directly and never decides what is visible or how it is colored.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;
use crate::event::{Event, EventId, EventPatch};
use crate::filter::{Classification, FilterEngine, FilterMode};
use crate::store::EventStore;
use crate::style::EventStyle;

/// A user request coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum Intent {
    CreateEvent {
        title: String,
        #[serde(default)]
        location: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    EditEvent {
        id: EventId,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        location: Option<String>,
    },
    DeleteEvent {
        id: EventId,
    },
    SetFilter {
        mode: FilterMode,
    },
}

/// What an applied intent changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    Created { event: Event },
    Updated { event: Event },
    Deleted { event: Event },
    FilterChanged { mode: FilterMode },
}

/// One event as the presentation layer should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleEvent {
    #[serde(flatten)]
    pub event: Event,
    pub classification: Classification,
    pub style: EventStyle,
}

/// The filtered, classified event list for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub filter: FilterMode,
    pub events: Vec<VisibleEvent>,
}

impl View {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// An event store plus the currently selected filter.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    store: EventStore,
    filter: FilterMode,
}

impl Tracker {
    pub fn new(filter: FilterMode) -> Self {
        Tracker {
            store: EventStore::new(),
            filter,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Apply one intent. On error nothing has changed.
    pub fn apply(&mut self, intent: Intent) -> TrackerResult<Outcome> {
        match intent {
            Intent::CreateEvent {
                title,
                location,
                start,
                end,
            } => {
                let event = self.store.create(title, location, start, end)?;
                Ok(Outcome::Created { event })
            }
            Intent::EditEvent {
                id,
                title,
                location,
            } => {
                let event = self.store.update(id, EventPatch { title, location })?;
                Ok(Outcome::Updated { event })
            }
            Intent::DeleteEvent { id } => {
                let event = self.store.delete(id)?;
                Ok(Outcome::Deleted { event })
            }
            Intent::SetFilter { mode } => {
                tracing::debug!(%mode, "filter changed");
                self.filter = mode;
                Ok(Outcome::FilterChanged { mode })
            }
        }
    }

    /// Build the view for the current filter against a single `now` sample.
    pub fn view<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> View {
        let engine = FilterEngine::at(now.clone());

        let events = engine
            .select(self.store.events(), self.filter)
            .into_iter()
            .map(|event| {
                let classification = engine.classify(event);
                VisibleEvent {
                    event: event.clone(),
                    classification,
                    style: classification.style(),
                }
            })
            .collect();

        View {
            filter: self.filter,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use chrono::Duration;

    fn june_1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn create_intent(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Intent {
        Intent::CreateEvent {
            title: title.to_string(),
            location: "Test Location".to_string(),
            start,
            end,
        }
    }

    fn created_id(outcome: Outcome) -> EventId {
        match outcome {
            Outcome::Created { event } => event.id,
            other => panic!("expected Created, got {other:?}"),
        }
    }

    #[test]
    fn test_view_styles_each_event() {
        let now = june_1();
        let mut tracker = Tracker::default();
        tracker
            .apply(create_intent(
                "Test Event",
                Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 10, 11, 0, 0).unwrap(),
            ))
            .unwrap();
        tracker
            .apply(create_intent("Soon", now + Duration::hours(2), now + Duration::hours(3)))
            .unwrap();

        let view = tracker.view(&now);
        assert_eq!(view.filter, FilterMode::All);
        assert_eq!(view.events.len(), 2);
        assert_eq!(view.events[0].classification, Classification::Past);
        assert_eq!(view.events[0].style.background_color.to_string(), "rgb(222, 105, 135)");
        assert_eq!(view.events[1].classification, Classification::Upcoming);
        assert_eq!(view.events[1].style.background_color.to_string(), "rgb(140, 189, 76)");
    }

    #[test]
    fn test_set_filter_changes_view() {
        let now = june_1();
        let mut tracker = Tracker::default();
        tracker
            .apply(create_intent("Old", now - Duration::days(3), now - Duration::days(3)))
            .unwrap();
        tracker
            .apply(create_intent("New", now + Duration::days(3), now + Duration::days(3)))
            .unwrap();

        let outcome = tracker
            .apply(Intent::SetFilter {
                mode: FilterMode::Upcoming,
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::FilterChanged {
                mode: FilterMode::Upcoming
            }
        );

        let view = tracker.view(&now);
        assert_eq!(view.events.len(), 1);
        assert_eq!(view.events[0].event.title, "New");
    }

    #[test]
    fn test_edit_and_delete_intents() {
        let now = june_1();
        let mut tracker = Tracker::default();
        let id = created_id(tracker.apply(create_intent("Original Event", now, now)).unwrap());

        let outcome = tracker
            .apply(Intent::EditEvent {
                id,
                title: Some("Updated Event".to_string()),
                location: Some("Updated Location".to_string()),
            })
            .unwrap();
        let Outcome::Updated { event } = outcome else {
            panic!("expected Updated");
        };
        assert_eq!(event.id, id);
        assert_eq!(event.title, "Updated Event");
        assert_eq!(event.start, now);

        tracker.apply(Intent::DeleteEvent { id }).unwrap();
        assert!(tracker.view(&now).is_empty());
        assert_eq!(
            tracker.apply(Intent::DeleteEvent { id }).unwrap_err(),
            TrackerError::NotFound(id)
        );
    }

    #[test]
    fn test_failed_intent_leaves_state() {
        let now = june_1();
        let mut tracker = Tracker::new(FilterMode::Past);

        let err = tracker.apply(create_intent("", now, now)).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(tracker.store().is_empty());
        assert_eq!(tracker.filter(), FilterMode::Past);
    }

    #[test]
    fn test_intent_json() {
        let intent: Intent = serde_json::from_str(
            r#"{"intent":"createEvent","title":"Test Event","start":"2024-01-10T10:00:00Z","end":"2024-01-10T11:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::CreateEvent {
                title: "Test Event".to_string(),
                location: String::new(),
                start: Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2024, 1, 10, 11, 0, 0).unwrap(),
            }
        );

        let intent: Intent =
            serde_json::from_str(r#"{"intent":"editEvent","id":3,"title":"x"}"#).unwrap();
        assert_eq!(
            intent,
            Intent::EditEvent {
                id: EventId(3),
                title: Some("x".to_string()),
                location: None,
            }
        );

        assert!(serde_json::from_str::<Intent>(r#"{"intent":"setFilter","mode":"week"}"#).is_err());
    }

    #[test]
    fn test_view_json_shape() {
        let now = june_1();
        let mut tracker = Tracker::default();
        tracker
            .apply(create_intent("Soon", now + Duration::hours(1), now + Duration::hours(2)))
            .unwrap();

        let json = serde_json::to_value(tracker.view(&now)).unwrap();
        assert_eq!(json["filter"], "all");
        let event = &json["events"][0];
        assert_eq!(event["id"], 1);
        assert_eq!(event["title"], "Soon");
        assert_eq!(event["classification"], "upcoming");
        assert_eq!(event["style"]["backgroundColor"], "rgb(140, 189, 76)");
    }
}

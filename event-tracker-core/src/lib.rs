//! Core types for the event tracker.
//!
//! This crate owns every decision the tracker makes about events:
//! - `store` holds the canonical event collection and enforces id uniqueness
//! - `filter` classifies events against wall-clock time and selects the visible subset
//! - `tracker` is the intent/view contract used by presentation layers
//!
//! Nothing here renders, prompts or persists anything.

pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod shared;
pub mod store;
pub mod style;
pub mod tracker;

pub use error::{TrackerError, TrackerResult};
pub use event::{Event, EventId, EventPatch};
pub use filter::{Classification, FilterEngine, FilterMode, classify, select};
pub use shared::SharedEventStore;
pub use store::EventStore;
pub use style::{EventStyle, Rgb};
pub use tracker::{Intent, Outcome, Tracker, View, VisibleEvent};

//! Event classification and filtering.
//!
//! Everything here is derived from the events and a single `now` sample;
//! nothing is stored and no event is ever modified.
//!
//! Note the deliberate asymmetry between the two predicates:
//! - `classify` marks an event `Past` when its *end* is before now
//! - the `upcoming` filter keeps events whose *start* is at or after now
//!
//! An event that is running at `now` is therefore in neither the `past` nor
//! the `upcoming` list, while still being styled as upcoming.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::event::Event;
use crate::style::{EventStyle, PAST_COLOR, Rgb, UPCOMING_COLOR};

/// Named predicate selecting which events are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterMode {
    #[default]
    All,
    Past,
    Upcoming,
    Today,
    Month,
}

impl FilterMode {
    pub const ALL_MODES: [FilterMode; 5] = [
        FilterMode::All,
        FilterMode::Past,
        FilterMode::Upcoming,
        FilterMode::Today,
        FilterMode::Month,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Past => "past",
            FilterMode::Upcoming => "upcoming",
            FilterMode::Today => "today",
            FilterMode::Month => "month",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact lowercase mode names. Anything else is an error, never
/// a fallback to `all`.
impl FromStr for FilterMode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_MODES
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| TrackerError::InvalidFilter(s.to_string()))
    }
}

impl TryFrom<String> for FilterMode {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Display classification of an event relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Past,
    Upcoming,
}

impl Classification {
    pub const fn color(self) -> Rgb {
        match self {
            Classification::Past => PAST_COLOR,
            Classification::Upcoming => UPCOMING_COLOR,
        }
    }

    pub const fn style(self) -> EventStyle {
        EventStyle {
            background_color: self.color(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Past => f.write_str("past"),
            Classification::Upcoming => f.write_str("upcoming"),
        }
    }
}

/// Filter engine bound to one sample of the current time.
///
/// Build one per filtering pass so that every event in the pass is compared
/// against the same instant. Calendar-day and calendar-month comparisons are
/// made in the time zone of the `now` it was built with.
#[derive(Debug, Clone)]
pub struct FilterEngine<Tz: TimeZone> {
    now: DateTime<Tz>,
    now_utc: DateTime<Utc>,
}

impl FilterEngine<Local> {
    /// Engine for the host's local clock, sampled once.
    pub fn local() -> Self {
        Self::at(Local::now())
    }
}

impl<Tz: TimeZone> FilterEngine<Tz> {
    pub fn at(now: DateTime<Tz>) -> Self {
        let now_utc = now.with_timezone(&Utc);
        FilterEngine { now, now_utc }
    }

    pub fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    /// `Past` when the event ended strictly before now. An event ending
    /// exactly at now is still `Upcoming`.
    pub fn classify(&self, event: &Event) -> Classification {
        if event.end < self.now_utc {
            Classification::Past
        } else {
            Classification::Upcoming
        }
    }

    pub fn matches(&self, event: &Event, mode: FilterMode) -> bool {
        match mode {
            FilterMode::All => true,
            FilterMode::Past => event.end < self.now_utc,
            FilterMode::Upcoming => event.start >= self.now_utc,
            FilterMode::Today => {
                let today = self.now.date_naive();
                self.local_date(&event.start) == today || self.local_date(&event.end) == today
            }
            FilterMode::Month => {
                let today = self.now.date_naive();
                same_month(self.local_date(&event.start), today)
                    || same_month(self.local_date(&event.end), today)
            }
        }
    }

    /// Order-preserving subsequence of `events` matching `mode`.
    pub fn select<'a>(&self, events: &'a [Event], mode: FilterMode) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e, mode)).collect()
    }

    /// Like `select`, but takes a raw mode name as received from a caller.
    pub fn select_named<'a>(
        &self,
        events: &'a [Event],
        mode: &str,
    ) -> TrackerResult<Vec<&'a Event>> {
        let mode: FilterMode = mode.parse()?;
        Ok(self.select(events, mode))
    }

    fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.now.timezone()).date_naive()
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// One-shot classification against `now`.
pub fn classify<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> Classification {
    FilterEngine::at(now.clone()).classify(event)
}

/// One-shot selection against `now`.
pub fn select<'a, Tz: TimeZone>(
    events: &'a [Event],
    mode: FilterMode,
    now: &DateTime<Tz>,
) -> Vec<&'a Event> {
    FilterEngine::at(now.clone()).select(events, mode)
}

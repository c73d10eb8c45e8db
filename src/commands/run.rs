//! Scripted sessions: JSON intents in, JSON views out.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use event_tracker_core::{Intent, Outcome, Tracker, View};
use serde::Serialize;

use crate::config::TrackerConfig;

/// Answer to one intent line. Exactly one of `outcome` and `error` is set.
#[derive(Debug, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub view: View,
}

/// Where a session reads the current time from.
#[derive(Debug, Clone, Copy)]
enum Now {
    /// `--now`, with the offset it was given in
    Pinned(DateTime<FixedOffset>),
    /// The host clock in the host time zone
    Clock,
}

impl Now {
    fn process(&self, tracker: &mut Tracker, line: &str) -> Option<Response> {
        match self {
            Now::Pinned(now) => process_line(tracker, line, now),
            Now::Clock => process_line(tracker, line, &Local::now()),
        }
    }
}

pub fn run(config: &TrackerConfig, file: Option<&Path>, now: Option<&str>) -> Result<()> {
    let now = match now {
        Some(input) => Now::Pinned(parse_now(input)?),
        None => Now::Clock,
    };

    let reader: Box<dyn BufRead> = match file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut tracker = Tracker::new(config.default_filter);
    let mut out = io::stdout().lock();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;

        // The clock is sampled once per intent unless pinned
        if let Some(response) = now.process(&mut tracker, &line) {
            if let Some(ref error) = response.error {
                tracing::debug!(line = index + 1, %error, "intent rejected");
            }
            serde_json::to_writer(&mut out, &response).context("Failed to write response")?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn parse_now(input: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input).with_context(|| {
        format!("Invalid --now '{}'. Expected RFC 3339, e.g. 2024-06-01T12:00:00Z", input)
    })
}

/// Apply one line of input. Blank lines and `#` comments produce nothing.
pub fn process_line<Tz: TimeZone>(
    tracker: &mut Tracker,
    line: &str,
    now: &DateTime<Tz>,
) -> Option<Response> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let result = serde_json::from_str::<Intent>(trimmed)
        .map_err(|e| format!("Invalid intent: {}", e))
        .and_then(|intent| tracker.apply(intent).map_err(|e| e.to_string()));

    let (outcome, error) = match result {
        Ok(outcome) => (Some(outcome), None),
        Err(error) => (None, Some(error)),
    };

    Some(Response {
        outcome,
        error,
        view: tracker.view(now),
    })
}

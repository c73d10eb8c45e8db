//! Terminal rendering for tracker views.
//!
//! Each visible event is painted with the background color of its style, so
//! past and upcoming events look the same here as in any other front end.

use chrono::{DateTime, Local, Utc};
use event_tracker_core::{Event, Rgb, View, VisibleEvent};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self, color: bool) -> String;
}

impl Render for VisibleEvent {
    fn render(&self, color: bool) -> String {
        let event = &self.event;
        let label = format!(" {} ", event.title);
        let label = if color {
            let Rgb(r, g, b) = self.style.background_color;
            label.on_truecolor(r, g, b).black().to_string()
        } else {
            label
        };

        let id = event.id.to_string();
        let mut line = format!("{:>5} {} {}", id, label, render_time_range(event));
        if !event.location.is_empty() {
            line.push_str(&format!(" @ {}", event.location));
        }

        let tag = format!("[{}]", self.classification);
        if color {
            line.push_str(&format!(" {}", tag.dimmed()));
        } else {
            line.push_str(&format!(" {}", tag));
        }
        line
    }
}

impl Render for View {
    fn render(&self, color: bool) -> String {
        let header = format!(
            "Filter: {} ({} {})",
            self.filter,
            self.events.len(),
            pluralize("event", self.events.len())
        );
        let header = if color { header.bold().to_string() } else { header };

        if self.is_empty() {
            let empty = "   No events";
            let empty = if color { empty.dimmed().to_string() } else { empty.to_string() };
            return format!("{}\n{}", header, empty);
        }

        let mut lines = vec![header];
        lines.extend(self.events.iter().map(|e| e.render(color)));
        lines.join("\n")
    }
}

/// "Wed Jan 10 10:00-11:00" for same-day events, full dates otherwise.
fn render_time_range(event: &Event) -> String {
    let start = local(&event.start);
    let end = local(&event.end);

    if start.date_naive() == end.date_naive() {
        format!("{}-{}", start.format("%a %b %-d %H:%M"), end.format("%H:%M"))
    } else {
        format!("{} -> {}", start.format("%a %b %-d %H:%M"), end.format("%a %b %-d %H:%M"))
    }
}

fn local(instant: &DateTime<Utc>) -> DateTime<Local> {
    instant.with_timezone(&Local)
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

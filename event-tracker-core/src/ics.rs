//! ICS export of tracked events.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::event::Event;

/// Generate an iCalendar document containing one VEVENT per event.
pub fn to_ics<'a>(events: impl IntoIterator<Item = &'a Event>) -> String {
    let mut cal = Calendar::new();
    cal.name("Event Tracker");

    // DTSTAMP is required by RFC 5545; all events in one export share it
    let dtstamp = format_utc(&Utc::now());

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&uid_for(event));
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.add_property("DTSTART", format_utc(&event.start));
        ics_event.add_property("DTEND", format_utc(&event.end));

        if !event.location.is_empty() {
            ics_event.location(&event.location);
        }

        cal.push(ics_event.done());
    }

    cal.done().to_string()
}

/// UID of the VEVENT generated for an event.
pub fn uid_for(event: &Event) -> String {
    format!("{}@event-tracker", event.id.0)
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use chrono::TimeZone;

    fn make_test_event(id: u64, location: &str) -> Event {
        Event {
            id: EventId(id),
            title: "Test Event".to_string(),
            location: location.to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 10, 11, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_to_ics_contains_event_fields() {
        let event = make_test_event(1, "Test Location");
        let ics = to_ics([&event]);

        assert!(ics.contains("BEGIN:VCALENDAR"), "ICS:\n{}", ics);
        assert!(ics.contains("UID:1@event-tracker"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Test Event"), "ICS:\n{}", ics);
        assert!(ics.contains("LOCATION:Test Location"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20240110T100000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20240110T110000Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_to_ics_one_vevent_per_event() {
        let events = vec![make_test_event(1, ""), make_test_event(2, "")];
        let ics = to_ics(&events);

        let count = ics.lines().filter(|l| l.starts_with("BEGIN:VEVENT")).count();
        assert_eq!(count, 2, "ICS:\n{}", ics);
        assert!(!ics.contains("LOCATION"), "empty location should be omitted. ICS:\n{}", ics);
    }

    #[test]
    fn test_to_ics_empty() {
        let events: Vec<Event> = Vec::new();
        let ics = to_ics(&events);
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}

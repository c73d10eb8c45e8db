use anyhow::Result;
use dialoguer::Input;
use event_tracker_core::{Event, Intent};

/// Prompt for a new title and location, pre-filled with the current values.
pub fn prompt(event: &Event) -> Result<Intent> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .with_initial_text(event.title.clone())
        .allow_empty(true)
        .interact_text()?;

    let location: String = Input::new()
        .with_prompt("  Where?")
        .with_initial_text(event.location.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(edit_intent(event, title, location))
}

/// Build an edit intent carrying only the fields that changed.
fn edit_intent(event: &Event, title: String, location: String) -> Intent {
    Intent::EditEvent {
        id: event.id,
        title: (title != event.title).then_some(title),
        location: (location != event.location).then_some(location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use event_tracker_core::EventId;

    fn make_test_event() -> Event {
        Event {
            id: EventId(4),
            title: "Original Event".to_string(),
            location: "Original Location".to_string(),
            start: Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 3, 20, 16, 0, 0).unwrap(),
        }
    }

    #[test]
    fn edit_intent_only_carries_changes() {
        let event = make_test_event();
        let intent = edit_intent(&event, "Updated Event".to_string(), event.location.clone());

        assert_eq!(
            intent,
            Intent::EditEvent {
                id: EventId(4),
                title: Some("Updated Event".to_string()),
                location: None,
            }
        );
    }

    #[test]
    fn edit_intent_passes_cleared_title_through() {
        let event = make_test_event();
        let intent = edit_intent(&event, String::new(), "Updated Location".to_string());

        assert_eq!(
            intent,
            Intent::EditEvent {
                id: EventId(4),
                title: Some(String::new()),
                location: Some("Updated Location".to_string()),
            }
        );
    }
}

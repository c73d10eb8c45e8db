use std::time::Duration as StdDuration;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use dialoguer::Input;
use event_tracker_core::Intent;
use owo_colors::OwoColorize;

/// Formats accepted before falling back to natural language parsing.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Prompt for the fields of a new event and build the create intent.
///
/// The title is passed through as typed, blank or not; the store decides
/// whether it is acceptable.
pub fn prompt(default_duration: StdDuration) -> Result<Intent> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .allow_empty(true)
        .interact_text()?;

    let location: String = Input::new()
        .with_prompt("  Where? (skip)")
        .allow_empty(true)
        .interact_text()?;

    let (start_local, start) = prompt_with_retry("  When?", |input| {
        let naive = parse_datetime(input)?;
        Ok((naive, to_instant(naive)?))
    })?;

    let hint = humantime::format_duration(default_duration).to_string();
    let end = prompt_with_retry(&format!("  How long? ({})", hint), |input| {
        to_instant(parse_end(input, start_local, default_duration)?)
    })?;

    Ok(Intent::CreateEvent {
        title,
        location,
        start,
        end,
    })
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a local wall-clock date/time.
///
/// Tries `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM[:SS]` and `YYYY-MM-DD`
/// (midnight) first, then natural language ("tomorrow 3pm", "fri 9am").
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        anyhow::bail!("A date/time is required");
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    let expanded = expand_abbreviations(trimmed);
    fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

/// Parse an end input: empty means the default duration, then a duration
/// ("30m", "1h 30m"), then a date/time with an optional "until"/"to" prefix.
pub fn parse_end(
    input: &str,
    start: NaiveDateTime,
    default: StdDuration,
) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return apply_duration(start, default);
    }

    if let Ok(duration) = humantime::parse_duration(trimmed) {
        return apply_duration(start, duration);
    }

    let cleaned = trimmed
        .strip_prefix("until ")
        .or_else(|| trimmed.strip_prefix("to "))
        .unwrap_or(trimmed);

    parse_datetime(cleaned)
}

fn apply_duration(start: NaiveDateTime, duration: StdDuration) -> Result<NaiveDateTime> {
    let duration = Duration::from_std(duration).context("Duration too large")?;
    start
        .checked_add_signed(duration)
        .context("End time out of range")
}

/// Interpret a wall-clock time in the host's local time zone.
pub fn to_instant(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    instant_in(&Local, naive)
}

fn instant_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("{} does not exist in the local time zone", naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    // --- expand_abbreviations ---

    #[test]
    fn expand_day_abbreviations() {
        assert_eq!(expand_abbreviations("sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("Fri 9am"), "friday 9am");
        assert_eq!(expand_abbreviations("thu noon"), "thursday noon");
    }

    #[test]
    fn expand_month_abbreviations() {
        assert_eq!(expand_abbreviations("jan 20"), "january 20");
        assert_eq!(expand_abbreviations("sept 5"), "september 5");
    }

    #[test]
    fn expand_preserves_non_abbreviations() {
        assert_eq!(expand_abbreviations("tomorrow 6pm"), "tomorrow 6pm");
        assert_eq!(expand_abbreviations("next  friday"), "next friday");
    }

    // --- parse_datetime ---

    #[test]
    fn parse_datetime_space_separated() {
        assert_eq!(parse_datetime("2026-03-20 15:00").unwrap(), at(15, 0));
    }

    #[test]
    fn parse_datetime_iso() {
        assert_eq!(parse_datetime("2026-03-20T09:30").unwrap(), at(9, 30));
        assert_eq!(parse_datetime(" 2026-03-20T09:30:00 ").unwrap(), at(9, 30));
    }

    #[test]
    fn parse_datetime_date_only_is_midnight() {
        assert_eq!(parse_datetime("2026-03-20").unwrap(), at(0, 0));
    }

    #[test]
    fn parse_datetime_natural_language() {
        assert!(parse_datetime("tomorrow 3pm").is_ok());
    }

    #[test]
    fn parse_datetime_rejects_empty() {
        assert!(parse_datetime("   ").is_err());
    }

    #[test]
    fn parse_datetime_invalid_input() {
        assert!(parse_datetime("not a date at all xyz").is_err());
    }

    // --- parse_end ---

    #[test]
    fn parse_end_empty_uses_default() {
        let end = parse_end("", at(15, 0), StdDuration::from_secs(3600)).unwrap();
        assert_eq!(end, at(16, 0));
    }

    #[test]
    fn parse_end_duration() {
        let default = StdDuration::from_secs(3600);
        assert_eq!(parse_end("45m", at(15, 0), default).unwrap(), at(15, 45));
        assert_eq!(parse_end("1h 30m", at(15, 0), default).unwrap(), at(16, 30));
    }

    #[test]
    fn parse_end_until_datetime() {
        let default = StdDuration::from_secs(3600);
        let end = parse_end("until 2026-03-20 18:15", at(15, 0), default).unwrap();
        assert_eq!(end, at(18, 15));
    }

    // --- to_instant ---

    #[test]
    fn to_instant_round_trips_through_local() {
        let naive = at(12, 0);
        let instant = to_instant(naive).unwrap();
        assert_eq!(instant.with_timezone(&Local).naive_local(), naive);
    }

    #[test]
    fn instant_in_rejects_times_skipped_by_dst() {
        use chrono_tz::Europe::Berlin;

        // Clocks jump from 02:00 to 03:00 on 2024-03-31
        let gap = parse_datetime("2024-03-31 02:30").unwrap();
        let err = instant_in(&Berlin, gap).unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        let after = parse_datetime("2024-03-31 03:30").unwrap();
        let instant = instant_in(&Berlin, after).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 31, 1, 30, 0).unwrap());
    }

    #[test]
    fn instant_in_takes_earliest_of_repeated_times() {
        use chrono_tz::Europe::Berlin;

        // 02:30 happens twice on 2024-10-27, first at +02:00
        let repeated = parse_datetime("2024-10-27 02:30").unwrap();
        let instant = instant_in(&Berlin, repeated).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 10, 27, 0, 30, 0).unwrap());
    }
}

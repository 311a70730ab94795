use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use thiserror::Error;

use crate::models::calendar::{EventRecord, RawEvent};
use crate::models::notion::DATE_PROPERTY;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "error in converting string date to time [properties/{}/date/{}]: {}",
    DATE_PROPERTY,
    .field,
    .value
)]
pub struct ParseError {
    pub field: &'static str,
    pub value: String,
}

pub fn normalize(name: &str, start: &str, end: &str) -> Result<RawEvent, ParseError> {
    // A time component in the start string marks a timed event.
    let is_all_day = !start.contains(':');

    let start_at = parse_instant(start, is_all_day).ok_or_else(|| ParseError {
        field: "start",
        value: start.to_string(),
    })?;
    let mut end_at = start_at;
    if !end.is_empty() {
        end_at = parse_instant(end, is_all_day).ok_or_else(|| ParseError {
            field: "end",
            value: end.to_string(),
        })?;
    }
    if is_all_day {
        end_at = end_at + Duration::days(1) - Duration::nanoseconds(1);
    }

    Ok(RawEvent {
        name: name.to_string(),
        start: start_at,
        end: end_at,
        is_all_day,
        level: None,
    })
}

/// Normalizes a whole day of records; the first malformed record fails the batch.
pub fn normalize_all(records: &[EventRecord]) -> Result<Vec<RawEvent>, ParseError> {
    records
        .iter()
        .map(|record| normalize(&record.name, &record.start, &record.end))
        .collect()
}

fn parse_instant(value: &str, is_all_day: bool) -> Option<DateTime<FixedOffset>> {
    if is_all_day {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
    } else {
        DateTime::parse_from_rfc3339(value).ok()
    }
}

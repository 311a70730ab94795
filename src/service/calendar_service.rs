use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hierarchy::assign_levels;
use super::normalizer::{normalize_all, ParseError};
use super::window::compute_window;
use crate::clients::notion_client::CalendarSource;
use crate::clients::FetchError;
use crate::models::calendar::{CalendarData, Event, EventRecord};
use crate::models::notion::{RawQueryResponse, RawQueryResult, DATE_PROPERTY, NAME_PROPERTY};

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("error found in the calendar json data: {0}")]
    Upstream(String),
    #[error("error found no property corresponding to {0} [properties/{0}]")]
    MissingProperty(&'static str),
    #[error("error title is absent [properties/{0}/title]")]
    MissingTitle(&'static str),
    #[error("error this is not a text object [properties/{0}/title[0]]")]
    NotText(&'static str),
    #[error("error date is absent [properties/{0}/date]")]
    MissingDate(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Pulls `(name, start, end)` out of every result row, failing on the first
/// row that does not carry them.
pub fn extract_records(response: &RawQueryResponse) -> Result<Vec<EventRecord>, CalendarError> {
    if response.object == "error" {
        return Err(CalendarError::Upstream(
            response.message.clone().unwrap_or_default(),
        ));
    }
    response.results.iter().map(extract_record).collect()
}

fn extract_record(result: &RawQueryResult) -> Result<EventRecord, CalendarError> {
    let name_prop = result
        .properties
        .get(NAME_PROPERTY)
        .ok_or(CalendarError::MissingProperty(NAME_PROPERTY))?;
    let first_title = name_prop
        .title
        .as_ref()
        .and_then(|title| title.first())
        .ok_or(CalendarError::MissingTitle(NAME_PROPERTY))?;
    let text = first_title
        .text
        .as_ref()
        .ok_or(CalendarError::NotText(NAME_PROPERTY))?;

    let date = result
        .properties
        .get(DATE_PROPERTY)
        .ok_or(CalendarError::MissingProperty(DATE_PROPERTY))?
        .date
        .as_ref()
        .ok_or(CalendarError::MissingDate(DATE_PROPERTY))?;

    Ok(EventRecord {
        name: text.content.clone(),
        start: date.start.clone(),
        end: date.end.clone().unwrap_or_default(),
    })
}

/// Normalizes, levels and windows one day of records.
pub fn layout_events(
    records: &[EventRecord],
    force_all_day: bool,
) -> Result<CalendarData, ParseError> {
    let events = assign_levels(&normalize_all(records)?);

    let Some(window) = compute_window(&events, force_all_day) else {
        tracing::debug!(
            count = events.len(),
            "no timed event produced a displayable window"
        );
        return Ok(CalendarData::empty());
    };

    Ok(CalendarData::new(
        window,
        events.iter().map(Event::from).collect(),
    ))
}

pub fn parse_calendar_data(
    response: &RawQueryResponse,
    force_all_day: bool,
) -> Result<CalendarData, CalendarError> {
    let records = extract_records(response)?;
    Ok(layout_events(&records, force_all_day)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEntry {
    pub time_desc: String,
    pub name: String,
}

/// Compact listing used by the wide calendar widget for days after today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub label: String,
    pub all_day: Vec<String>,
    pub timed: Vec<TimedEntry>,
    pub no_events: bool,
}

impl DaySummary {
    pub fn from_calendar(label: String, calendar: &CalendarData) -> Self {
        let (all_day, timed): (Vec<&Event>, Vec<&Event>) =
            calendar.events.iter().partition(|event| event.is_all_day);
        Self {
            label,
            all_day: all_day.iter().map(|event| event.name.clone()).collect(),
            timed: timed
                .iter()
                .map(|event| TimedEntry {
                    time_desc: event.time_desc.clone(),
                    name: event.name.clone(),
                })
                .collect(),
            no_events: calendar.is_empty(),
        }
    }
}

pub struct CalendarService;

impl CalendarService {
    pub async fn day<S: CalendarSource + ?Sized>(
        source: &S,
        day: NaiveDate,
        force_all_day: bool,
    ) -> Result<CalendarData, CalendarError> {
        let response = source.query_day(day).await?;
        let calendar = parse_calendar_data(&response, force_all_day)?;
        tracing::info!(%day, events = calendar.events.len(), "calendar laid out");
        Ok(calendar)
    }

    pub async fn summary<S: CalendarSource + ?Sized>(
        source: &S,
        day: NaiveDate,
    ) -> Result<DaySummary, CalendarError> {
        let calendar = Self::day(source, day, false).await?;
        Ok(DaySummary::from_calendar(day_label(day), &calendar))
    }
}

/// "January 2" style label.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%B %-d").to_string()
}

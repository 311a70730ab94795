use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

pub const EVENT_COLOR: &str = "red";

/// One calendar entry as extracted from the upstream source, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl EventRecord {
    pub fn new(name: &str, start: &str, end: &str) -> Self {
        Self {
            name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub name: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub is_all_day: bool,
    pub level: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub time_desc: String,
    pub start_mins: u32,
    pub end_mins: u32,
    pub level: usize,
    pub color: String,
    pub is_all_day: bool,
}

impl From<&RawEvent> for Event {
    fn from(event: &RawEvent) -> Self {
        Self {
            name: event.name.clone(),
            time_desc: format!(
                "{}:{:02}-{}:{:02}",
                event.start.hour(),
                event.start.minute(),
                event.end.hour(),
                event.end.minute()
            ),
            start_mins: event.start.hour() * 60 + event.start.minute(),
            end_mins: event.end.hour() * 60 + event.end.minute(),
            level: event.level.unwrap_or_default(),
            color: EVENT_COLOR.to_string(),
            is_all_day: event.is_all_day,
        }
    }
}

/// Visible hour range of the time axis. `max_hour` may be 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub min_hour: u32,
    pub max_hour: u32,
}

impl TimeWindow {
    pub const FULL_DAY: TimeWindow = TimeWindow {
        min_hour: 0,
        max_hour: 24,
    };

    pub fn slot_count(&self) -> u32 {
        self.max_hour - self.min_hour + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    pub min_hour: u32,
    pub max_hour: u32,
    pub slot_count: u32,
    pub events: Vec<Event>,
}

impl CalendarData {
    pub fn new(window: TimeWindow, events: Vec<Event>) -> Self {
        Self {
            min_hour: window.min_hour,
            max_hour: window.max_hour,
            slot_count: window.slot_count(),
            events,
        }
    }

    // No displayable window: rendered as "no events".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn window(&self) -> Option<TimeWindow> {
        if self.is_empty() {
            return None;
        }
        Some(TimeWindow {
            min_hour: self.min_hour,
            max_hour: self.max_hour,
        })
    }
}

use chrono::Timelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowLine {
    pub minute: i64,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourLine {
    pub index: u32,
    pub label: u32,
}

/// Grid lines and the current-time marker for a `min_hour..=max_hour` axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub row_count: u32,
    pub min_hour: u32,
    pub now_line: NowLine,
    pub lines: Vec<HourLine>,
}

pub fn time_axis<T: Timelike>(min_hour: u32, max_hour: u32, now: &T) -> TimeAxis {
    // Minutes are relative to the top of the axis.
    let span = (i64::from(max_hour) - i64::from(min_hour)) * 60;
    let mut minute = (i64::from(now.hour()) - i64::from(min_hour)) * 60 + i64::from(now.minute());
    let mut visible = true;
    if minute < 0 || minute > span {
        visible = false;
        minute = 0;
    }

    let lines = (min_hour..=max_hour)
        .filter(|hour| hour % 3 == 0 || *hour == max_hour)
        .map(|hour| HourLine {
            index: hour - min_hour,
            label: hour,
        })
        .collect();

    TimeAxis {
        row_count: max_hour - min_hour + 1,
        min_hour,
        now_line: NowLine { minute, visible },
        lines,
    }
}

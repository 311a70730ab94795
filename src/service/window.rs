use chrono::Timelike;

use crate::models::calendar::{RawEvent, TimeWindow};

/// Visible hour range for a day's events.
///
/// `None` means no timed event produced a usable range; callers render that
/// as an empty day rather than an error.
pub fn compute_window(events: &[RawEvent], force_all_day: bool) -> Option<TimeWindow> {
    if force_all_day {
        return Some(TimeWindow::FULL_DAY);
    }

    let (min_hour, max_hour) = events
        .iter()
        .filter(|event| !event.is_all_day)
        .fold((24, 0), |(min_hour, max_hour), event| {
            (
                min_hour.min(event.start.hour()),
                max_hour.max(event.end.hour() + 1),
            )
        });

    if max_hour <= min_hour {
        return None;
    }
    Some(TimeWindow { min_hour, max_hour })
}

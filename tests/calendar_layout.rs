use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use proptest::prelude::*;
use screensaver::models::calendar::{EventRecord, RawEvent, TimeWindow};
use screensaver::service::calendar_service::layout_events;
use screensaver::service::hierarchy::{assign_levels, level_count};
use screensaver::service::normalizer::{normalize, normalize_all};
use screensaver::service::window::compute_window;

fn level_of(events: &[screensaver::models::calendar::Event], name: &str) -> usize {
    events
        .iter()
        .find(|event| event.name == name)
        .map(|event| event.level)
        .unwrap_or_else(|| panic!("{} missing from output", name))
}

#[test]
fn touching_events_share_a_level() {
    let records = vec![
        EventRecord::new("A", "2024-06-01T09:00:00+09:00", "2024-06-01T10:00:00+09:00"),
        EventRecord::new("B", "2024-06-01T09:30:00+09:00", "2024-06-01T10:30:00+09:00"),
        EventRecord::new("C", "2024-06-01T10:00:00+09:00", "2024-06-01T11:00:00+09:00"),
    ];
    let calendar = layout_events(&records, false).unwrap();

    assert_eq!(level_of(&calendar.events, "A"), 0);
    assert_eq!(level_of(&calendar.events, "C"), 0);
    assert_eq!(level_of(&calendar.events, "B"), 1);
    assert_eq!(
        (calendar.min_hour, calendar.max_hour, calendar.slot_count),
        (9, 12, 4)
    );

    let a = calendar.events.iter().find(|e| e.name == "A").unwrap();
    assert_eq!(a.time_desc, "9:00-10:00");
    assert_eq!((a.start_mins, a.end_mins), (540, 600));
    assert_eq!(a.color, "red");
}

#[test]
fn one_bad_date_fails_the_whole_day() {
    let records = vec![
        EventRecord::new("ok", "2024-06-01T09:00:00+09:00", "2024-06-01T10:00:00+09:00"),
        EventRecord::new("bad", "not-a-date", ""),
    ];
    let err = layout_events(&records, false).unwrap_err();
    assert_eq!(err.value, "not-a-date");
    assert!(normalize_all(&records).is_err());
}

#[test]
fn all_day_without_end_covers_the_day() {
    let event = normalize("holiday", "2024-06-01", "").unwrap();
    assert!(event.is_all_day);
    assert_eq!(event.start.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    assert_eq!(
        event.end.to_rfc3339(),
        "2024-06-01T23:59:59.999999999+00:00"
    );
}

#[test]
fn longer_event_anchors_on_shared_start() {
    let records = vec![
        EventRecord::new("B", "2024-06-01T10:00:00+09:00", "2024-06-01T11:00:00+09:00"),
        EventRecord::new("A", "2024-06-01T10:00:00+09:00", "2024-06-01T12:00:00+09:00"),
    ];
    let levelled = assign_levels(&normalize_all(&records).unwrap());
    assert_eq!(levelled[0].name, "A");
    assert_eq!(levelled[0].level, Some(0));
    assert_eq!(levelled[1].level, Some(1));
}

#[test]
fn only_all_day_events_have_no_window() {
    let records = vec![EventRecord::new("holiday", "2024-06-01", "")];
    let events = normalize_all(&records).unwrap();
    assert_eq!(compute_window(&events, false), None);

    let calendar = layout_events(&records, false).unwrap();
    assert!(calendar.is_empty());
    assert_eq!(calendar.window(), None);
}

#[test]
fn forced_all_day_uses_the_full_day() {
    let records = vec![EventRecord::new("holiday", "2024-06-01", "")];
    let calendar = layout_events(&records, true).unwrap();
    assert_eq!(calendar.window(), Some(TimeWindow::FULL_DAY));
    assert_eq!(calendar.slot_count, 25);
    assert_eq!(calendar.events.len(), 1);
}

#[test]
fn empty_day_is_not_an_error() {
    let calendar = layout_events(&[], false).unwrap();
    assert!(calendar.is_empty());
}

fn day_start() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .unwrap()
}

fn raw_events(spans: &[(i64, i64)]) -> Vec<RawEvent> {
    spans
        .iter()
        .enumerate()
        .map(|(idx, (start, length))| {
            let start = day_start() + Duration::minutes(*start);
            RawEvent {
                name: format!("event-{}", idx),
                start,
                end: start + Duration::minutes(*length),
                is_all_day: false,
                level: None,
            }
        })
        .collect()
}

fn max_overlap(events: &[RawEvent]) -> usize {
    events
        .iter()
        .map(|probe| {
            events
                .iter()
                .filter(|e| e.start <= probe.start && probe.start < e.end)
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn spans() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..1380, 1i64..240), 1..24)
}

proptest! {
    #[test]
    fn same_level_events_never_overlap(spans in spans()) {
        let levelled = assign_levels(&raw_events(&spans));
        for a in &levelled {
            for b in &levelled {
                if a.name != b.name && a.level == b.level {
                    prop_assert!(a.end <= b.start || b.end <= a.start);
                }
            }
        }
    }

    #[test]
    fn level_count_matches_peak_overlap(spans in spans()) {
        let events = raw_events(&spans);
        let levelled = assign_levels(&events);
        prop_assert_eq!(level_count(&levelled), max_overlap(&events));
    }

    #[test]
    fn every_event_gets_a_level(spans in spans()) {
        let events = raw_events(&spans);
        let levelled = assign_levels(&events);
        prop_assert_eq!(levelled.len(), events.len());
        prop_assert!(levelled.iter().all(|event| event.level.is_some()));
    }
}

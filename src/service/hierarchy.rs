use std::collections::VecDeque;

use crate::models::calendar::RawEvent;

/// Assigns every event a level such that events sharing a level never overlap.
///
/// Events are ordered by start, longer events first on ties, then packed one
/// level at a time: each level greedily chains every remaining event that
/// starts at or after the end of the previously placed one. The returned list
/// is in placement order (level-major), not chronological order.
pub fn assign_levels(events: &[RawEvent]) -> Vec<RawEvent> {
    let mut sorted: Vec<RawEvent> = events.to_vec();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    let mut pending: VecDeque<RawEvent> = sorted.into();
    let mut placed = Vec::with_capacity(pending.len());
    let mut level = 0;
    while let Some(mut anchor) = pending.pop_front() {
        anchor.level = Some(level);
        let mut anchor_end = anchor.end;
        placed.push(anchor);

        // Events left for deeper levels keep their sorted order.
        let mut deferred = VecDeque::with_capacity(pending.len());
        for mut next in pending.drain(..) {
            if next.start >= anchor_end {
                next.level = Some(level);
                anchor_end = next.end;
                placed.push(next);
            } else {
                deferred.push_back(next);
            }
        }
        pending = deferred;
        level += 1;
    }
    placed
}

pub fn level_count(events: &[RawEvent]) -> usize {
    events
        .iter()
        .filter_map(|event| event.level)
        .max()
        .map_or(0, |max| max + 1)
}

//! Compute a room's free time within the business window for one day.
//!
//! Sorts reservations by start, merges overlapping busy periods, then returns
//! the gaps between merged periods inside the window.

use serde::Serialize;

use crate::policy::BusinessHours;
use crate::reservation::Occupied;
use crate::time::{DaySpan, TimeOfDay};

/// A free time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u16,
}

impl FreeSlot {
    fn between(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            duration_minutes: DaySpan::new(start, end).duration_minutes(),
        }
    }
}

/// Merge overlapping or adjacent busy periods, clipped to `window`.
///
/// Empty and inverted spans are ignored. Returns a sorted, non-overlapping
/// list of spans.
pub fn merge_busy_periods<R: Occupied>(reservations: &[R], window: &DaySpan) -> Vec<DaySpan> {
    let mut spans: Vec<DaySpan> = reservations
        .iter()
        .map(Occupied::span)
        .filter(|s| s.start < s.end && s.overlaps(window))
        .map(|s| DaySpan::new(s.start.max(window.start), s.end.min(window.end)))
        .collect();

    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<DaySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(last) = merged.last_mut() {
            if span.start <= last.end {
                last.end = last.end.max(span.end);
                continue;
            }
        }
        merged.push(span);
    }

    merged
}

/// Free slots inside the business window, sorted by start.
pub fn free_slots<R: Occupied>(reservations: &[R], hours: &BusinessHours) -> Vec<FreeSlot> {
    let window = hours.window();
    let mut slots = Vec::new();
    let mut cursor = window.start;

    for busy in merge_busy_periods(reservations, &window) {
        if cursor < busy.start {
            slots.push(FreeSlot::between(cursor, busy.start));
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < window.end {
        slots.push(FreeSlot::between(cursor, window.end));
    }

    slots
}

/// The first free slot at least `min_duration_minutes` long.
pub fn first_free_slot<R: Occupied>(
    reservations: &[R],
    hours: &BusinessHours,
    min_duration_minutes: u16,
) -> Option<FreeSlot> {
    free_slots(reservations, hours)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

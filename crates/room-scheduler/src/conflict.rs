//! Detect a candidate's overlaps with a room's existing reservations for a day.
//!
//! Callers pass only the reservations of the same room and date. Adjacent
//! reservations (one ends exactly when the other starts) are NOT conflicts.

use crate::reservation::{Occupied, ReservationId};
use crate::time::DaySpan;

/// An existing reservation that overlaps the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<'a, R> {
    pub existing: &'a R,
    pub overlap_minutes: u16,
}

/// Return the first existing reservation overlapping `candidate`, in input order.
///
/// Two spans overlap when `a.start < b.end && b.start < a.end`. The record whose
/// id equals `exclude_id` is skipped so an edit never conflicts with itself.
pub fn find_conflict<'a, R: Occupied>(
    candidate: &DaySpan,
    existing: &'a [R],
    exclude_id: Option<&ReservationId>,
) -> Option<&'a R> {
    existing
        .iter()
        .filter(|e| Some(e.id()) != exclude_id)
        .find(|e| candidate.overlaps(&e.span()))
}

/// Find every existing reservation overlapping `candidate`, with overlap length.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts<'a, R: Occupied>(
    candidate: &DaySpan,
    existing: &'a [R],
    exclude_id: Option<&ReservationId>,
) -> Vec<Conflict<'a, R>> {
    existing
        .iter()
        .filter(|e| Some(e.id()) != exclude_id)
        .filter_map(|e| {
            candidate
                .overlap_minutes(&e.span())
                .map(|overlap_minutes| Conflict {
                    existing: e,
                    overlap_minutes,
                })
        })
        .collect()
}

//! The single entry point composing format, business-rule, conflict, and
//! subject checks into one accept/reject verdict.

use serde::{Deserialize, Serialize};

use crate::conflict::find_conflict;
use crate::error::Reason;
use crate::policy::{validate_business_rules, BusinessHours};
use crate::reservation::{Occupied, ReservationId};
use crate::time::{validate_format, DaySpan, TimeOfDay};

/// Raw user input for a reservation that has not been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub start: String,
    pub end: String,
    pub subject: String,
}

impl Candidate {
    pub fn new(start: impl Into<String>, end: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            subject: subject.into(),
        }
    }
}

/// Verdict for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Accepted { start: TimeOfDay, end: TimeOfDay },
    Rejected { reason: Reason },
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted { .. })
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<DaySpan, Reason> {
        match self {
            Decision::Accepted { start, end } => Ok(DaySpan::new(start, end)),
            Decision::Rejected { reason } => Err(reason),
        }
    }
}

/// Decide whether `candidate` may join `existing`.
///
/// `existing` must already be filtered to the candidate's room and date.
/// Checks run in this order and the first failure wins:
///
/// 1. [`validate_format`] → `MALFORMED_TIME`
/// 2. [`validate_business_rules`] → `OUTSIDE_BUSINESS_HOURS`, `NON_POSITIVE_DURATION`
/// 3. [`find_conflict`] (skipping `exclude_id`) → `OVERLAP`
/// 4. subject is non-empty after trimming → `EMPTY_SUBJECT`
///
/// Pure and side-effect free; safe to call once for quick feedback and again
/// right before commit.
pub fn decide<R: Occupied>(
    candidate: &Candidate,
    existing: &[R],
    exclude_id: Option<&ReservationId>,
    hours: &BusinessHours,
) -> Decision {
    match check(candidate, existing, exclude_id, hours) {
        Ok(span) => Decision::Accepted {
            start: span.start,
            end: span.end,
        },
        Err(reason) => Decision::Rejected { reason },
    }
}

fn check<R: Occupied>(
    candidate: &Candidate,
    existing: &[R],
    exclude_id: Option<&ReservationId>,
    hours: &BusinessHours,
) -> Result<DaySpan, Reason> {
    let (start, end) = validate_format(&candidate.start, &candidate.end)?;
    validate_business_rules(start, end, hours)?;

    let span = DaySpan::new(start, end);
    if find_conflict(&span, existing, exclude_id).is_some() {
        return Err(Reason::Overlap);
    }
    if candidate.subject.trim().is_empty() {
        return Err(Reason::EmptySubject);
    }
    Ok(span)
}

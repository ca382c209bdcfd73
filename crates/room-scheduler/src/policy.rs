//! Business-hour rules a candidate must satisfy before conflict checking.

use serde::{Deserialize, Serialize};

use crate::error::Reason;
use crate::time::{DaySpan, TimeOfDay};

/// Default opening time, 09:00.
pub const OPEN_MINUTES: u16 = 540;
/// Default closing time, 19:00.
pub const CLOSE_MINUTES: u16 = 1140;

/// The daily window in which reservations are permitted.
///
/// Both boundaries are inclusive for the reservation's outer edges: a booking
/// may start exactly at `open` and end exactly at `close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: TimeOfDay(OPEN_MINUTES),
            close: TimeOfDay(CLOSE_MINUTES),
        }
    }
}

impl BusinessHours {
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Self {
        Self { open, close }
    }

    /// The whole window as a span.
    pub fn window(&self) -> DaySpan {
        DaySpan::new(self.open, self.close)
    }

    /// Both endpoints lie in `[open, close]`, whatever their order.
    pub fn contains(&self, span: &DaySpan) -> bool {
        self.admits(span.start) && self.admits(span.end)
    }

    fn admits(&self, t: TimeOfDay) -> bool {
        self.open <= t && t <= self.close
    }
}

/// Check a normalized start/end pair against the business window.
///
/// Rules are checked in order and the first failure wins:
/// 1. `start` and `end` both within `[open, close]`, else [`Reason::OutsideBusinessHours`]
/// 2. `start < end`, else [`Reason::NonPositiveDuration`]
pub fn validate_business_rules(
    start: TimeOfDay,
    end: TimeOfDay,
    hours: &BusinessHours,
) -> Result<(), Reason> {
    if !hours.contains(&DaySpan::new(start, end)) {
        return Err(Reason::OutsideBusinessHours);
    }
    if start >= end {
        return Err(Reason::NonPositiveDuration);
    }
    Ok(())
}

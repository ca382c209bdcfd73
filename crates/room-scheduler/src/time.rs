//! Clock times within a single day and half-open spans between them.
//!
//! Times are stored as minute-of-day (`0..=1439`). The accepted text form is
//! `H:MM` or `HH:MM` with a 24-hour clock; the normalized form is always the
//! zero-padded `HH:MM`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Reason;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// A time of day at minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(pub(crate) u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from a minute-of-day. Returns `None` past 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(TimeOfDay(minutes))
    }

    /// Build from an hour (`0..=23`) and minute (`0..=59`).
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour >= 24 || minute >= MINUTES_PER_HOUR {
            return None;
        }
        Some(TimeOfDay(hour * MINUTES_PER_HOUR + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / MINUTES_PER_HOUR
    }

    pub fn minute(self) -> u16 {
        self.0 % MINUTES_PER_HOUR
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // hour and minute are range-checked at construction
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = Reason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock(s).ok_or(Reason::MalformedTime)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid time of day '{raw}'")))
    }
}

/// Strict `H:MM` / `HH:MM` parser: ASCII digits only, exactly two minute digits.
fn parse_clock(s: &str) -> Option<TimeOfDay> {
    let (hour, minute) = s.split_once(':')?;
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    TimeOfDay::from_hm(hour.parse().ok()?, minute.parse().ok()?)
}

/// Parse and normalize a start/end pair.
///
/// Both strings must be `H:MM` or `HH:MM` with hour `0..=23` and minute
/// `0..=59`. `"9:05"` is accepted and normalizes to `09:05`; `"9:5"` is not.
///
/// # Errors
/// Returns [`Reason::MalformedTime`] if either string fails to parse.
pub fn validate_format(start: &str, end: &str) -> Result<(TimeOfDay, TimeOfDay), Reason> {
    Ok((start.parse()?, end.parse()?))
}

/// A half-open interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaySpan {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl DaySpan {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Length in minutes, zero for empty or inverted spans.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Half-open overlap test. Spans that only touch do not overlap.
    pub fn overlaps(&self, other: &DaySpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared with `other`, or `None` if they do not overlap.
    pub fn overlap_minutes(&self, other: &DaySpan) -> Option<u16> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        Some(end.minutes() - start.minutes())
    }
}

impl fmt::Display for DaySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

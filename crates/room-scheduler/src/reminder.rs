//! When to remind a reservation's owner, computed in the site's timezone.
//!
//! Reservation times are wall-clock times in the configured IANA zone. The
//! reminder fires `lead_minutes` before the start instant.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ReminderError;
use crate::reservation::Reservation;
use crate::time::TimeOfDay;

/// Longest DST gap searched when a wall-clock time does not exist.
const MAX_GAP_MINUTES: i64 = 180;

fn parse_tz(timezone: &str) -> Result<Tz, ReminderError> {
    timezone
        .parse()
        .map_err(|_| ReminderError::InvalidTimezone(timezone.to_string()))
}

/// Resolve a local wall-clock time to UTC.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant. Times
/// inside a spring-forward gap shift to the first valid minute after the gap.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, ReminderError> {
    for shift in 0..=MAX_GAP_MINUTES {
        let candidate = local + Duration::minutes(shift);
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    Err(ReminderError::Unresolvable(local.to_string()))
}

/// The UTC instant at which a reservation starting at `start` on `date` begins.
pub fn start_instant(
    date: NaiveDate,
    start: TimeOfDay,
    timezone: &str,
) -> Result<DateTime<Utc>, ReminderError> {
    let tz = parse_tz(timezone)?;
    resolve_local(tz, date.and_time(start.to_naive_time()))
}

/// The UTC instant at which the reminder should be sent.
///
/// # Errors
/// Returns `ReminderError::InvalidTimezone` if `timezone` is not an IANA name.
pub fn reminder_at(
    date: NaiveDate,
    start: TimeOfDay,
    timezone: &str,
    lead_minutes: u32,
) -> Result<DateTime<Utc>, ReminderError> {
    Ok(start_instant(date, start, timezone)? - Duration::minutes(i64::from(lead_minutes)))
}

/// A reminder is due once its send time has passed, until the meeting starts,
/// and only if it has not been sent yet.
pub fn is_reminder_due(
    reservation: &Reservation,
    now: DateTime<Utc>,
    timezone: &str,
    lead_minutes: u32,
) -> Result<bool, ReminderError> {
    if reservation.reminder_sent {
        return Ok(false);
    }
    let starts = start_instant(reservation.date, reservation.start, timezone)?;
    let send_at = starts - Duration::minutes(i64::from(lead_minutes));
    Ok(send_at <= now && now < starts)
}

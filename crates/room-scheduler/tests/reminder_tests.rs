//! Tests for timezone-aware reminder scheduling.

use chrono::{NaiveDate, TimeZone, Utc};
use room_scheduler::reminder::{is_reminder_due, reminder_at, start_instant};
use room_scheduler::{ReminderError, Reservation, ReservationId, RoomId, TimeOfDay, UserId};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn utc_reminder_is_start_minus_lead() {
    let at = reminder_at(day(2026, 3, 2), t("10:00"), "UTC", 30).unwrap();
    assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap());
}

#[test]
fn local_time_converts_to_utc() {
    // Tokyo is UTC+9 year-round
    let at = reminder_at(day(2026, 3, 2), t("09:00"), "Asia/Tokyo", 15).unwrap();
    assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 1, 23, 45, 0).unwrap());
}

#[test]
fn lead_may_cross_midnight() {
    let at = reminder_at(day(2026, 3, 2), t("00:10"), "UTC", 30).unwrap();
    assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 1, 23, 40, 0).unwrap());
}

#[test]
fn spring_forward_gap_shifts_to_first_valid_minute() {
    // America/New_York skips 02:00-03:00 on 2026-03-08
    let start = start_instant(day(2026, 3, 8), t("02:30"), "America/New_York").unwrap();
    // 03:00 EDT == 07:00 UTC
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 8, 7, 0, 0).unwrap());
}

#[test]
fn fall_back_ambiguity_takes_earlier_instant() {
    // 01:30 happens twice on 2026-11-01 in New York; the first is EDT (UTC-4)
    let start = start_instant(day(2026, 11, 1), t("01:30"), "America/New_York").unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

#[test]
fn invalid_timezone_rejected() {
    assert_eq!(
        reminder_at(day(2026, 3, 2), t("10:00"), "Mars/Olympus_Mons", 30),
        Err(ReminderError::InvalidTimezone("Mars/Olympus_Mons".to_string()))
    );
}

fn reservation(start: &str, sent: bool) -> Reservation {
    Reservation {
        id: ReservationId::new("r1"),
        room: RoomId(1),
        date: day(2026, 3, 2),
        start: t(start),
        end: t("18:00"),
        subject: "Demo".to_string(),
        owner: UserId::new("erin"),
        reminder_sent: sent,
    }
}

#[test]
fn due_window_is_lead_until_start() {
    let r = reservation("14:00", false);
    let at = |h, m| Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap();

    assert!(!is_reminder_due(&r, at(13, 29), "UTC", 30).unwrap());
    assert!(is_reminder_due(&r, at(13, 30), "UTC", 30).unwrap());
    assert!(is_reminder_due(&r, at(13, 59), "UTC", 30).unwrap());
    assert!(!is_reminder_due(&r, at(14, 0), "UTC", 30).unwrap());
}

#[test]
fn sent_reminders_are_never_due() {
    let r = reservation("14:00", true);
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 13, 45, 0).unwrap();
    assert!(!is_reminder_due(&r, now, "UTC", 30).unwrap());
}

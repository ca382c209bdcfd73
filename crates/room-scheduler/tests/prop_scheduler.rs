//! Property-based tests for the scheduler using proptest.
//!
//! These verify invariants that should hold for *any* input, not just the
//! examples in the other test files.

use chrono::NaiveDate;
use proptest::prelude::*;
use room_scheduler::freebusy::merge_busy_periods;
use room_scheduler::{
    decide, find_conflict, free_slots, validate_business_rules, validate_format, BusinessHours,
    Candidate, DaySpan, Decision, Reason, Reservation, ReservationId, RoomId, TimeOfDay, UserId,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_minute() -> impl Strategy<Value = u16> {
    0u16..1440
}

/// Minute inside the default 09:00-19:00 window (inclusive of close).
fn arb_business_minute() -> impl Strategy<Value = u16> {
    540u16..=1140
}

fn arb_span() -> impl Strategy<Value = DaySpan> {
    (arb_business_minute(), 1u16..=240).prop_filter_map("span past close", |(start, len)| {
        let end = start + len;
        (end <= 1140).then(|| DaySpan::new(tod(start), tod(end)))
    })
}

/// A day of reservations that may overlap each other (legacy data).
fn arb_day() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec(arb_span(), 0..8).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, span)| reservation(&format!("r{i}"), span))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tod(minutes: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap()
}

fn reservation(id: &str, span: DaySpan) -> Reservation {
    Reservation {
        id: ReservationId::new(id),
        room: RoomId(1),
        date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        start: span.start,
        end: span.end,
        subject: "Busy".to_string(),
        owner: UserId::new("prop"),
        reminder_sent: false,
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Valid clock strings normalize to zero-padded HH:MM
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn valid_times_normalize(hour in 0u16..24, minute in 0u16..60) {
        let expected = format!("{:02}:{:02}", hour, minute);
        let short = format!("{}:{:02}", hour, minute);

        let (a, b) = validate_format(&short, &expected).unwrap();
        prop_assert_eq!(a.to_string(), expected.clone());
        prop_assert_eq!(b.to_string(), expected.clone());
        prop_assert_eq!(a.minutes(), hour * 60 + minute);

        // normalizing twice is a no-op
        let (again, _) = validate_format(&a.to_string(), "00:00").unwrap();
        prop_assert_eq!(again, a);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Single-digit minutes are always malformed
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn single_digit_minutes_rejected(hour in 0u16..24, minute in 0u16..10) {
        let raw = format!("{}:{}", hour, minute);
        prop_assert_eq!(validate_format(&raw, "12:00"), Err(Reason::MalformedTime));
    }
}

// ---------------------------------------------------------------------------
// Property 3: Anything leaving the window is OUTSIDE_BUSINESS_HOURS
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn outside_window_rejected_regardless_of_duration(
        start in arb_minute(),
        end in arb_minute(),
    ) {
        prop_assume!(start < 540 || end > 1140);
        let result = validate_business_rules(tod(start), tod(end), &BusinessHours::default());
        prop_assert_eq!(result, Err(Reason::OutsideBusinessHours));
    }
}

// ---------------------------------------------------------------------------
// Property 3b: Inverted spans with an endpoint outside are OUTSIDE too
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn inverted_span_leaving_window_is_outside(
        early in arb_minute(),
        late in arb_minute(),
    ) {
        prop_assume!(early < late);
        prop_assume!(late > 1140 || early < 540);
        // start after end, one of them off the window
        let result = validate_business_rules(tod(late), tod(early), &BusinessHours::default());
        prop_assert_eq!(result, Err(Reason::OutsideBusinessHours));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Inside the window, start >= end is NON_POSITIVE_DURATION
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn non_positive_duration_inside_window(
        start in arb_business_minute(),
        end in arb_business_minute(),
    ) {
        let result = validate_business_rules(tod(start), tod(end), &BusinessHours::default());
        if start >= end {
            prop_assert_eq!(result, Err(Reason::NonPositiveDuration));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Overlap is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_span(), b in arb_span()) {
        let a_vs_b = find_conflict(&a, &[reservation("b", b)], None).is_some();
        let b_vs_a = find_conflict(&b, &[reservation("a", a)], None).is_some();
        prop_assert_eq!(a_vs_b, b_vs_a);
    }
}

// ---------------------------------------------------------------------------
// Property 6: A record never conflicts with itself when excluded
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn self_exclusion(span in arb_span()) {
        let existing = vec![reservation("self", span)];
        let id = ReservationId::new("self");
        prop_assert!(find_conflict(&span, &existing, Some(&id)).is_none());
        prop_assert!(find_conflict(&span, &existing, None).is_some());
    }
}

// ---------------------------------------------------------------------------
// Property 7: An accepted candidate overlaps nothing in the day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn accepted_candidates_never_overlap(day in arb_day(), span in arb_span()) {
        let candidate = Candidate::new(span.start.to_string(), span.end.to_string(), "Sync");
        let decision = decide(&candidate, &day, None, &BusinessHours::default());

        let brute_force_clash = day.iter().any(|r| {
            span.start < r.end && r.start < span.end
        });
        match decision {
            Decision::Accepted { start, end } => {
                prop_assert!(!brute_force_clash);
                prop_assert_eq!(DaySpan::new(start, end), span);
            }
            Decision::Rejected { reason } => {
                prop_assert!(brute_force_clash);
                prop_assert_eq!(reason, Reason::Overlap);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 8: Free slots and merged busy periods tile the business window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn free_and_busy_tile_the_window(day in arb_day()) {
        let hours = BusinessHours::default();
        let free = free_slots(&day, &hours);
        let busy = merge_busy_periods(&day, &hours.window());

        let free_total: u32 = free.iter().map(|s| u32::from(s.duration_minutes)).sum();
        let busy_total: u32 = busy.iter().map(|s| u32::from(s.duration_minutes())).sum();
        prop_assert_eq!(free_total + busy_total, 600);

        // no free slot touches a reservation
        for slot in &free {
            let slot_span = DaySpan::new(slot.start, slot.end);
            prop_assert!(find_conflict(&slot_span, &day, None).is_none());
        }

        // slots are sorted and disjoint
        for pair in free.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }
}

//! WASM bindings for room-scheduler.
//!
//! Exposes reservation decisions, conflict lookup, and free-slot computation
//! to JavaScript via `wasm-bindgen`. All complex types are passed as JSON
//! strings. Existing bookings are a JSON array of `{id, start, end}` objects
//! already filtered to one room and date.
//!
//! An optional `config_json` argument carries a scheduler config document
//! (`{"hours": {"open": "09:00", "close": "19:00"}, ...}`); when omitted the
//! default 09:00-19:00 window applies.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p room-scheduler-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/room-scheduler-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/room_scheduler_wasm.wasm
//! ```

use room_scheduler::{BookedSlot, BusinessHours, Candidate, ReservationId, SchedulerConfig, TimeOfDay};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ConflictDto<'a> {
    id: &'a str,
    start: TimeOfDay,
    end: TimeOfDay,
    overlap_minutes: u16,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_slots_json(json: &str) -> Result<Vec<BookedSlot>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid bookings JSON: {}", e))
}

fn business_hours(config_json: Option<&str>) -> Result<BusinessHours, String> {
    match config_json {
        Some(json) => SchedulerConfig::from_json(json)
            .map(|config| config.hours)
            .map_err(|e| format!("Invalid config: {}", e)),
        None => Ok(BusinessHours::default()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn decide_json(
    start: &str,
    end: &str,
    subject: &str,
    existing_json: &str,
    exclude_id: Option<&str>,
    config_json: Option<&str>,
) -> Result<String, String> {
    let existing = parse_slots_json(existing_json)?;
    let hours = business_hours(config_json)?;
    let exclude = exclude_id.map(ReservationId::new);

    let decision = room_scheduler::decide(
        &Candidate::new(start, end, subject),
        &existing,
        exclude.as_ref(),
        &hours,
    );
    to_json(&decision)
}

fn conflicts_json(
    start: &str,
    end: &str,
    existing_json: &str,
    exclude_id: Option<&str>,
) -> Result<String, String> {
    let existing = parse_slots_json(existing_json)?;
    let (start, end) = room_scheduler::validate_format(start, end).map_err(|r| r.to_string())?;
    let exclude = exclude_id.map(ReservationId::new);

    let span = room_scheduler::DaySpan::new(start, end);
    let conflicts = room_scheduler::find_conflicts(&span, &existing, exclude.as_ref());

    let dtos: Vec<ConflictDto> = conflicts
        .iter()
        .map(|c| ConflictDto {
            id: c.existing.id.as_str(),
            start: c.existing.start,
            end: c.existing.end,
            overlap_minutes: c.overlap_minutes,
        })
        .collect();
    to_json(&dtos)
}

fn free_slots_json(
    existing_json: &str,
    config_json: Option<&str>,
    min_minutes: Option<u16>,
) -> Result<String, String> {
    let existing = parse_slots_json(existing_json)?;
    let hours = business_hours(config_json)?;

    match min_minutes {
        Some(min) => to_json(&room_scheduler::first_free_slot(&existing, &hours, min)),
        None => to_json(&room_scheduler::free_slots(&existing, &hours)),
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Decide whether a candidate reservation may join a room's day.
///
/// Returns `{"verdict":"ACCEPTED","start":"HH:MM","end":"HH:MM"}` or
/// `{"verdict":"REJECTED","reason":"<CODE>"}`. A rejection is a successful
/// call; only malformed JSON arguments produce an error.
///
/// # Arguments
/// - `start`, `end` -- `H:MM` or `HH:MM`
/// - `subject` -- reason for the booking
/// - `existing_json` -- JSON array of `{id, start, end}` for the same room/day
/// - `exclude_id` -- id of the booking being edited, if any
/// - `config_json` -- optional scheduler config document
#[wasm_bindgen]
pub fn decide(
    start: &str,
    end: &str,
    subject: &str,
    existing_json: &str,
    exclude_id: Option<String>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    decide_json(
        start,
        end,
        subject,
        existing_json,
        exclude_id.as_deref(),
        config_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Normalize `H:MM` / `HH:MM` to `HH:MM`.
#[wasm_bindgen(js_name = "normalizeTime")]
pub fn normalize_time(time: &str) -> Result<String, JsValue> {
    time.parse::<TimeOfDay>()
        .map(|t| t.to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// List every existing booking that overlaps `[start, end)`.
///
/// Returns a JSON array of `{id, start, end, overlap_minutes}` in input order.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(
    start: &str,
    end: &str,
    existing_json: &str,
    exclude_id: Option<String>,
) -> Result<String, JsValue> {
    conflicts_json(start, end, existing_json, exclude_id.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Free slots within business hours.
///
/// Returns a JSON array of `{start, end, duration_minutes}`. With
/// `min_minutes`, returns only the first slot at least that long, or `null`.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(
    existing_json: &str,
    config_json: Option<String>,
    min_minutes: Option<u16>,
) -> Result<String, JsValue> {
    free_slots_json(existing_json, config_json.as_deref(), min_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

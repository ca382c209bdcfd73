//! Error types for room-scheduler operations.
//!
//! [`Reason`] is the rejection taxonomy of the pure scheduler; every rejection
//! is an ordinary outcome meant to be shown to the user verbatim. The other
//! enums cover the booking boundary (store, service, config, reminders).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reservation::{ReservationId, RoomId};

/// Why the scheduler refused a candidate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    #[error("time must be written as H:MM or HH:MM")]
    MalformedTime,

    #[error("reservation falls outside business hours")]
    OutsideBusinessHours,

    #[error("reservation must end after it starts")]
    NonPositiveDuration,

    #[error("reservation overlaps an existing booking")]
    Overlap,

    #[error("reservation subject must not be empty")]
    EmptySubject,
}

impl Reason {
    /// Stable machine-readable code, e.g. `OUTSIDE_BUSINESS_HOURS`.
    pub fn code(&self) -> &'static str {
        match self {
            Reason::MalformedTime => "MALFORMED_TIME",
            Reason::OutsideBusinessHours => "OUTSIDE_BUSINESS_HOURS",
            Reason::NonPositiveDuration => "NON_POSITIVE_DURATION",
            Reason::Overlap => "OVERLAP",
            Reason::EmptySubject => "EMPTY_SUBJECT",
        }
    }
}

/// Failures reported by a [`ReservationStore`](crate::store::ReservationStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("reservation not found: {0}")]
    NotFound(ReservationId),

    /// The guard found a conflicting record while holding the write lock.
    #[error("write aborted, conflicts with reservation {0}")]
    Conflict(ReservationId),

    /// The record's room or date differs from the stored one.
    #[error("reservation {0} cannot move to another room or day")]
    Relocation(ReservationId),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Failures of the [`Bookings`](crate::booking::Bookings) service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("rejected: {0}")]
    Rejected(#[from] Reason),

    /// Another writer committed an overlapping reservation after the
    /// optimistic check. The caller should refresh and retry.
    #[error("conflict at commit with reservation {with}")]
    ConflictAtCommit { with: ReservationId },

    #[error("unknown room: {0}")]
    UnknownRoom(RoomId),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("reservation not found: {0}")]
    NotFound(ReservationId),

    #[error("only the owner or an administrator may change reservation {0}")]
    Forbidden(ReservationId),

    #[error(transparent)]
    Store(StoreError),
}

impl BookingError {
    /// Stable machine-readable code for the UI layer.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::Rejected(reason) => reason.code(),
            BookingError::ConflictAtCommit { .. } => "CONFLICT_AT_COMMIT",
            BookingError::UnknownRoom(_) => "UNKNOWN_ROOM",
            BookingError::InvalidDate(_) => "INVALID_DATE",
            BookingError::NotFound(_) => "NOT_FOUND",
            BookingError::Forbidden(_) => "FORBIDDEN",
            BookingError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => BookingError::NotFound(id),
            StoreError::Conflict(with) => BookingError::ConflictAtCommit { with },
            other => BookingError::Store(other),
        }
    }
}

/// Invalid scheduler configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid time in config field {field}: '{value}'")]
    InvalidTime { field: &'static str, value: String },

    #[error("business hours must open before they close ({open} >= {close})")]
    EmptyBusinessWindow { open: String, close: String },

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid number in {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("no rooms configured")]
    NoRooms,

    #[error("duplicate room id: {0}")]
    DuplicateRoom(RoomId),
}

/// Failures computing a reminder instant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("local time {0} does not exist in the configured timezone")]
    Unresolvable(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

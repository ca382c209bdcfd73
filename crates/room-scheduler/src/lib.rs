//! # room-scheduler
//!
//! Reservation conflict checking and booking policy for a shared set of
//! meeting rooms.
//!
//! The scheduler core (`time`, `policy`, `conflict`, `decision`) is pure: it
//! decides, without any I/O, whether a candidate interval may join a room's
//! existing reservations for a day. The remaining modules wrap it in a booking
//! service that re-runs the same check atomically at commit time.
//!
//! ## Modules
//!
//! - [`time`]: `H:MM` parsing, `TimeOfDay`, half-open `DaySpan`
//! - [`policy`]: business-hour window and its validation rules
//! - [`conflict`]: overlap detection against a day's reservations
//! - [`decision`]: `decide`, chaining format → business rules → overlap → subject
//! - [`freebusy`]: free slots within the business window
//! - [`reservation`]: reservation records, rooms, users, roles
//! - [`config`]: `SchedulerConfig` from JSON and `ROOMS_*` variables
//! - [`store`]: `ReservationStore` trait with guarded writes, `MemoryStore`
//! - [`booking`]: `Bookings` service: create, edit, cancel, reminders
//! - [`notify`]: post-commit `ReservationEvent`s and the `Notifier` trait
//! - [`reminder`]: timezone-aware reminder instants
//! - [`error`]: rejection reasons and error types
//!
//! ## Quick start
//!
//! ```rust
//! use room_scheduler::{decide, BookedSlot, BusinessHours, Candidate, Decision, Reason};
//!
//! let hours = BusinessHours::default();
//! let existing: Vec<BookedSlot> = Vec::new();
//! let candidate = Candidate::new("8:00", "9:00", "Standup");
//! assert_eq!(
//!     decide(&candidate, &existing, None, &hours),
//!     Decision::Rejected { reason: Reason::OutsideBusinessHours }
//! );
//! ```

pub mod booking;
pub mod config;
pub mod conflict;
pub mod decision;
pub mod error;
pub mod freebusy;
pub mod notify;
pub mod policy;
pub mod reminder;
pub mod reservation;
pub mod store;
pub mod time;

pub use booking::{BookingRequest, Bookings, EditRequest};
pub use config::SchedulerConfig;
pub use conflict::{find_conflict, find_conflicts, Conflict};
pub use decision::{decide, Candidate, Decision};
pub use error::{BookingError, ConfigError, Reason, ReminderError, StoreError};
pub use freebusy::{first_free_slot, free_slots, FreeSlot};
pub use notify::{LogNotifier, Notifier, ReservationEvent};
pub use policy::{validate_business_rules, BusinessHours};
pub use reservation::{
    Actor, BookedSlot, Occupied, Reservation, ReservationId, Role, Room, RoomId, UserId,
};
pub use store::{MemoryStore, ReservationStore};
pub use time::{validate_format, DaySpan, TimeOfDay};

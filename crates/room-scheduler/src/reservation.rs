//! Reservation records, rooms, and the identities that own them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::time::{DaySpan, TimeOfDay};

/// Identifier of a room from the configured set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned reservation identifier.
///
/// Ids minted by [`MemoryStore`](crate::store::MemoryStore) are ULIDs; ids read
/// from other stores are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh, time-ordered id.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// The authenticated caller of a booking operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user: UserId,
    pub role: Role,
}

impl Actor {
    pub fn member(user: impl Into<String>) -> Self {
        Self {
            user: UserId::new(user),
            role: Role::Member,
        }
    }

    pub fn admin(user: impl Into<String>) -> Self {
        Self {
            user: UserId::new(user),
            role: Role::Admin,
        }
    }

    /// Owners may change their own reservations; admins may change any.
    pub fn may_modify(&self, reservation: &Reservation) -> bool {
        self.role == Role::Admin || self.user == reservation.owner
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
}

/// Anything occupying a room for part of a day.
pub trait Occupied {
    fn id(&self) -> &ReservationId;
    fn span(&self) -> DaySpan;
}

/// The minimal `{id, start, end}` view of a stored reservation, as returned
/// by a day query against an external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub id: ReservationId,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Occupied for BookedSlot {
    fn id(&self) -> &ReservationId {
        &self.id
    }

    fn span(&self) -> DaySpan {
        DaySpan::new(self.start, self.end)
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room: RoomId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub subject: String,
    pub owner: UserId,
    #[serde(default)]
    pub reminder_sent: bool,
}

impl Reservation {
    pub fn span(&self) -> DaySpan {
        DaySpan::new(self.start, self.end)
    }
}

impl Occupied for Reservation {
    fn id(&self) -> &ReservationId {
        &self.id
    }

    fn span(&self) -> DaySpan {
        Reservation::span(self)
    }
}

impl From<&Reservation> for BookedSlot {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.clone(),
            start: r.start,
            end: r.end,
        }
    }
}

/// A reservation that passed the scheduler but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room: RoomId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub subject: String,
    pub owner: UserId,
}

impl NewReservation {
    pub fn span(&self) -> DaySpan {
        DaySpan::new(self.start, self.end)
    }

    /// Attach a store-assigned id.
    pub fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            room: self.room,
            date: self.date,
            start: self.start,
            end: self.end,
            subject: self.subject,
            owner: self.owner,
            reminder_sent: false,
        }
    }
}

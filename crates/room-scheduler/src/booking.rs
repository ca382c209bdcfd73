//! Create, edit, and cancel reservations against a store.
//!
//! Every write runs the scheduler twice: once optimistically against a
//! snapshot of the day for fast feedback, then again as the store's guard,
//! under the store's lock, right before the write commits. A guard failure
//! surfaces as [`BookingError::ConflictAtCommit`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::conflict::find_conflict;
use crate::decision::{decide, Candidate};
use crate::error::{BookingError, Result, StoreError};
use crate::freebusy::{self, FreeSlot};
use crate::notify::{Notifier, ReservationEvent};
use crate::reminder::is_reminder_due;
use crate::reservation::{Actor, NewReservation, Reservation, ReservationId, Room, RoomId, UserId};
use crate::store::ReservationStore;
use crate::time::DaySpan;

/// Input for a new reservation, as collected by a booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub room: RoomId,
    /// `YYYY-MM-DD`
    pub date: String,
    pub start: String,
    pub end: String,
    pub subject: String,
}

/// New time and subject for an existing reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub start: String,
    pub end: String,
    pub subject: String,
}

/// Booking service over a store and a notifier.
pub struct Bookings<S, N> {
    config: SchedulerConfig,
    store: S,
    notifier: N,
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    if raw.len() != 10 {
        return Err(BookingError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(raw.to_string()))
}

fn conflict_guard<'a>(
    span: DaySpan,
    exclude_id: Option<&'a ReservationId>,
) -> impl Fn(&[Reservation]) -> Option<ReservationId> + 'a {
    move |day: &[Reservation]| find_conflict(&span, day, exclude_id).map(|r| r.id.clone())
}

impl<S: ReservationStore, N: Notifier> Bookings<S, N> {
    pub fn new(config: SchedulerConfig, store: S, notifier: N) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rooms(&self) -> &[Room] {
        &self.config.rooms
    }

    fn known_room(&self, room: RoomId) -> Result<RoomId> {
        self.config
            .room(room)
            .map(|r| r.id)
            .ok_or(BookingError::UnknownRoom(room))
    }

    /// Book a room for `actor`.
    pub fn create(&self, actor: &Actor, request: BookingRequest) -> Result<Reservation> {
        let room = self.known_room(request.room)?;
        let date = parse_date(&request.date)?;
        let candidate = Candidate::new(request.start, request.end, request.subject);

        let existing = self.store.list_day(room, date)?;
        let span = decide(&candidate, &existing, None, &self.config.hours)
            .into_result()
            .inspect_err(|reason| {
                debug!(%room, %date, user = %actor.user, reason = reason.code(), "booking rejected");
            })?;

        let draft = NewReservation {
            room,
            date,
            start: span.start,
            end: span.end,
            subject: candidate.subject.trim().to_string(),
            owner: actor.user.clone(),
        };
        let guard = conflict_guard(span, None);
        let record = self
            .store
            .insert_guarded(draft, &guard)
            .map_err(|err| commit_failed(err, room, date, span))?;

        info!(id = %record.id, %room, %date, %span, owner = %record.owner, "reservation created");
        self.notifier.notify(&ReservationEvent::Created {
            reservation: record.clone(),
        });
        Ok(record)
    }

    /// Change the time or subject of a reservation. Owner or admin only.
    pub fn edit(&self, actor: &Actor, id: &ReservationId, request: EditRequest) -> Result<Reservation> {
        let current = self.store.get(id)?;
        if !actor.may_modify(&current) {
            return Err(BookingError::Forbidden(id.clone()));
        }

        let candidate = Candidate::new(request.start, request.end, request.subject);
        let existing = self.store.list_day(current.room, current.date)?;
        let span = decide(&candidate, &existing, Some(id), &self.config.hours)
            .into_result()
            .inspect_err(|reason| {
                debug!(%id, user = %actor.user, reason = reason.code(), "edit rejected");
            })?;

        let updated = Reservation {
            start: span.start,
            end: span.end,
            subject: candidate.subject.trim().to_string(),
            // the store keeps or re-arms the reminder flag
            ..current.clone()
        };
        let guard = conflict_guard(span, Some(id));
        let record = self
            .store
            .replace_guarded(updated, &guard)
            .map_err(|err| commit_failed(err, current.room, current.date, span))?;

        info!(%id, room = %record.room, date = %record.date, %span, user = %actor.user, "reservation updated");
        self.notifier.notify(&ReservationEvent::Updated {
            before: current,
            after: record.clone(),
        });
        Ok(record)
    }

    /// Delete a reservation. Owner or admin only.
    pub fn cancel(&self, actor: &Actor, id: &ReservationId) -> Result<Reservation> {
        let current = self.store.get(id)?;
        if !actor.may_modify(&current) {
            return Err(BookingError::Forbidden(id.clone()));
        }

        let removed = self.store.remove(id)?;
        info!(%id, room = %removed.room, date = %removed.date, user = %actor.user, "reservation cancelled");
        self.notifier.notify(&ReservationEvent::Cancelled {
            reservation: removed.clone(),
            by: actor.user.clone(),
        });
        Ok(removed)
    }

    /// A room's reservations for one day, sorted by start.
    pub fn day_schedule(&self, room: RoomId, date: &str) -> Result<Vec<Reservation>> {
        let room = self.known_room(room)?;
        let date = parse_date(date)?;
        Ok(self.store.list_day(room, date)?)
    }

    /// A room's free slots within business hours for one day.
    pub fn free_slots(&self, room: RoomId, date: &str) -> Result<Vec<FreeSlot>> {
        let day = self.day_schedule(room, date)?;
        Ok(freebusy::free_slots(&day, &self.config.hours))
    }

    /// All reservations owned by `user`, ordered by date, room, then start.
    pub fn reservations_of(&self, user: &UserId) -> Result<Vec<Reservation>> {
        Ok(self
            .store
            .list_all()?
            .into_iter()
            .filter(|r| &r.owner == user)
            .collect())
    }

    /// Send every reminder that is due at `now` and not yet sent.
    ///
    /// Each reservation is flagged in the store before its notification goes
    /// out, so concurrent dispatchers never remind the same booking twice.
    /// Returns how many reminders were sent.
    pub fn dispatch_due_reminders(&self, now: DateTime<Utc>) -> Result<usize> {
        let lead = self.config.reminder_lead_minutes;
        let mut sent = 0;

        for reservation in self.store.list_all()? {
            match is_reminder_due(&reservation, now, &self.config.timezone, lead) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    warn!(id = %reservation.id, error = %err, "cannot schedule reminder");
                    continue;
                }
            }

            match self.store.mark_reminded(&reservation.id) {
                Ok(true) => {}
                Ok(false) | Err(StoreError::NotFound(_)) => continue,
                Err(err) => return Err(err.into()),
            }

            debug!(id = %reservation.id, owner = %reservation.owner, "reminder due");
            self.notifier.notify(&ReservationEvent::Reminder {
                reservation: Reservation {
                    reminder_sent: true,
                    ..reservation
                },
            });
            sent += 1;
        }

        if sent > 0 {
            info!(sent, "reminders dispatched");
        }
        Ok(sent)
    }
}

fn commit_failed(err: StoreError, room: RoomId, date: NaiveDate, span: DaySpan) -> BookingError {
    if let StoreError::Conflict(with) = &err {
        warn!(%room, %date, %span, %with, "conflict detected at commit");
    }
    err.into()
}

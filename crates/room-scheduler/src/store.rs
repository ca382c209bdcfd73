//! Persistence boundary for reservations.
//!
//! The scheduler never touches a store; the booking service reads a day's
//! snapshot through [`ReservationStore::list_day`] and writes through the
//! guarded methods, which re-run a conflict check under the store's own lock
//! for that room and day.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tracing::debug;

use crate::error::StoreError;
use crate::reservation::{NewReservation, Reservation, ReservationId, RoomId};

/// Re-check run atomically before a write commits. Receives every stored
/// reservation of the target room/day and returns the id of a conflicting one.
pub type Guard<'g> = &'g dyn Fn(&[Reservation]) -> Option<ReservationId>;

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait ReservationStore: Send + Sync {
    /// Reservations of one room on one day, sorted by start.
    fn list_day(&self, room: RoomId, date: NaiveDate) -> Result<Vec<Reservation>>;

    fn get(&self, id: &ReservationId) -> Result<Reservation>;

    /// Every stored reservation, ordered by date, room, then start.
    fn list_all(&self) -> Result<Vec<Reservation>>;

    /// Assign an id and persist `draft` unless `guard` reports a conflict.
    fn insert_guarded(&self, draft: NewReservation, guard: Guard<'_>) -> Result<Reservation>;

    /// Overwrite the stored record with the same id unless `guard` reports a
    /// conflict. The record's room and date must match the stored ones.
    ///
    /// `record.reminder_sent` is ignored: the stored flag is kept while the
    /// start is unchanged and cleared when it moves. Returns the record as
    /// stored.
    fn replace_guarded(&self, record: Reservation, guard: Guard<'_>) -> Result<Reservation>;

    fn remove(&self, id: &ReservationId) -> Result<Reservation>;

    /// Flag the reminder as sent. Returns `false` if it already was.
    fn mark_reminded(&self, id: &ReservationId) -> Result<bool>;
}

impl<S: ReservationStore + ?Sized> ReservationStore for Arc<S> {
    fn list_day(&self, room: RoomId, date: NaiveDate) -> Result<Vec<Reservation>> {
        (**self).list_day(room, date)
    }

    fn get(&self, id: &ReservationId) -> Result<Reservation> {
        (**self).get(id)
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        (**self).list_all()
    }

    fn insert_guarded(&self, draft: NewReservation, guard: Guard<'_>) -> Result<Reservation> {
        (**self).insert_guarded(draft, guard)
    }

    fn replace_guarded(&self, record: Reservation, guard: Guard<'_>) -> Result<Reservation> {
        (**self).replace_guarded(record, guard)
    }

    fn remove(&self, id: &ReservationId) -> Result<Reservation> {
        (**self).remove(id)
    }

    fn mark_reminded(&self, id: &ReservationId) -> Result<bool> {
        (**self).mark_reminded(id)
    }
}

type DayKey = (RoomId, NaiveDate);

/// In-process store. Each room/day bucket is guarded by its map entry lock, so
/// a guarded write sees every write to the same day that committed before it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    days: DashMap<DayKey, Vec<Reservation>>,
    index: DashMap<ReservationId, DayKey>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn locate(&self, id: &ReservationId) -> Result<DayKey> {
        self.index
            .get(id)
            .map(|key| *key)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

fn sort_day(day: &mut [Reservation]) {
    day.sort_by(|a, b| (a.start, a.end, &a.id).cmp(&(b.start, b.end, &b.id)));
}

impl ReservationStore for MemoryStore {
    fn list_day(&self, room: RoomId, date: NaiveDate) -> Result<Vec<Reservation>> {
        Ok(self
            .days
            .get(&(room, date))
            .map(|day| day.value().clone())
            .unwrap_or_default())
    }

    fn get(&self, id: &ReservationId) -> Result<Reservation> {
        let key = self.locate(id)?;
        self.days
            .get(&key)
            .and_then(|day| day.iter().find(|r| &r.id == id).cloned())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        let mut all: Vec<Reservation> = self
            .days
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| (a.date, a.room, a.start).cmp(&(b.date, b.room, b.start)));
        Ok(all)
    }

    fn insert_guarded(&self, draft: NewReservation, guard: Guard<'_>) -> Result<Reservation> {
        let key = (draft.room, draft.date);
        let mut day = self.days.entry(key).or_default();

        if let Some(conflicting) = guard(day.as_slice()) {
            debug!(room = %draft.room, date = %draft.date, %conflicting, "guarded insert aborted");
            return Err(StoreError::Conflict(conflicting));
        }

        let record = draft.into_reservation(ReservationId::generate());
        day.push(record.clone());
        sort_day(day.as_mut_slice());
        self.index.insert(record.id.clone(), key);
        Ok(record)
    }

    fn replace_guarded(&self, record: Reservation, guard: Guard<'_>) -> Result<Reservation> {
        let key = self.locate(&record.id)?;
        if key != (record.room, record.date) {
            return Err(StoreError::Relocation(record.id));
        }

        let mut day = self
            .days
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;

        if let Some(conflicting) = guard(day.as_slice()) {
            debug!(id = %record.id, %conflicting, "guarded replace aborted");
            return Err(StoreError::Conflict(conflicting));
        }

        let slot = day
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        let record = Reservation {
            reminder_sent: slot.reminder_sent && slot.start == record.start,
            ..record
        };
        *slot = record.clone();
        sort_day(day.as_mut_slice());
        Ok(record)
    }

    fn remove(&self, id: &ReservationId) -> Result<Reservation> {
        let (_, key) = self
            .index
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let removed = {
            let mut day = self
                .days
                .get_mut(&key)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            let pos = day
                .iter()
                .position(|r| &r.id == id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            day.remove(pos)
        };
        self.days.remove_if(&key, |_, day| day.is_empty());
        Ok(removed)
    }

    fn mark_reminded(&self, id: &ReservationId) -> Result<bool> {
        let key = self.locate(id)?;
        let mut day = self
            .days
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let record = day
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if record.reminder_sent {
            return Ok(false);
        }
        record.reminder_sent = true;
        Ok(true)
    }
}

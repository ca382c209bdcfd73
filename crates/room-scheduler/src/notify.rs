//! Post-commit notifications.
//!
//! The booking service emits a [`ReservationEvent`] only after the store has
//! durably recorded the change. Delivery (push gateway, email transport) lives
//! behind the [`Notifier`] trait.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::reservation::{Reservation, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReservationEvent {
    Created { reservation: Reservation },
    Updated { before: Reservation, after: Reservation },
    Cancelled { reservation: Reservation, by: UserId },
    Reminder { reservation: Reservation },
}

impl ReservationEvent {
    /// The reservation the event is about (the new state for updates).
    pub fn reservation(&self) -> &Reservation {
        match self {
            ReservationEvent::Created { reservation }
            | ReservationEvent::Cancelled { reservation, .. }
            | ReservationEvent::Reminder { reservation } => reservation,
            ReservationEvent::Updated { after, .. } => after,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReservationEvent::Created { .. } => "created",
            ReservationEvent::Updated { .. } => "updated",
            ReservationEvent::Cancelled { .. } => "cancelled",
            ReservationEvent::Reminder { .. } => "reminder",
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, event: &ReservationEvent);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, event: &ReservationEvent) {
        (**self).notify(event);
    }
}

/// Writes each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &ReservationEvent) {
        let r = event.reservation();
        info!(
            kind = event.kind(),
            id = %r.id,
            room = %r.room,
            date = %r.date,
            span = %r.span(),
            owner = %r.owner,
            "reservation event"
        );
    }
}

use std::sync::RwLock;

use crate::engine::inventory::SeatInventory;
use crate::error::EngineError;
use crate::models::{Booking, BookingStatus};

/// Owner of all booking records and the only writer of seat inventory
/// state. Bookings are append-only: cancellation flips status, nothing is
/// ever removed, so the ledger doubles as the audit history.
///
/// Lock discipline: every mutation holds the ledger write lock across its
/// paired inventory call, so the inventory is never ahead of the ledger.
/// A seat visible in the inventory always belongs to an Active booking that
/// a subsequent ledger read will see. Inventory calls acquire and drop
/// their own locks internally and never wait on the ledger, so the
/// ordering is acyclic.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: RwLock<Vec<Booking>>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly-built Active booking after claiming its seats.
    /// The claim is the commit point: if it fails, nothing changed.
    pub fn create(
        &self,
        inventory: &SeatInventory,
        booking: Booking,
    ) -> Result<Booking, EngineError> {
        let mut bookings = self.bookings.write().expect("ledger lock poisoned");
        inventory.try_claim(&booking.showtime_id, &booking.seats, &booking.id)?;
        bookings.push(booking.clone());
        tracing::info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            showtime_id = %booking.showtime_id,
            seats = booking.seats.len(),
            "booking created"
        );
        Ok(booking)
    }

    /// Cancels a booking, releasing its seats. Cancelling an already
    /// cancelled booking is an idempotent success and must not release
    /// twice.
    pub fn cancel(&self, inventory: &SeatInventory, id: &str) -> Result<Booking, EngineError> {
        let mut bookings = self.bookings.write().expect("ledger lock poisoned");
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| EngineError::not_found("booking", id))?;

        if booking.status == BookingStatus::Active {
            inventory.release(&booking.showtime_id, &booking.seats);
            booking.status = BookingStatus::Cancelled;
            tracing::info!(booking_id = %id, "booking cancelled");
        }
        Ok(booking.clone())
    }

    /// Re-activates a cancelled booking by re-claiming its original seats.
    /// Restoration is not guaranteed: any seat claimed by another booking
    /// in the interim yields SeatConflict and the booking stays Cancelled.
    pub fn restore(&self, inventory: &SeatInventory, id: &str) -> Result<Booking, EngineError> {
        let mut bookings = self.bookings.write().expect("ledger lock poisoned");
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| EngineError::not_found("booking", id))?;

        if booking.status == BookingStatus::Cancelled {
            inventory.try_claim(&booking.showtime_id, &booking.seats, &booking.id)?;
            booking.status = BookingStatus::Active;
            tracing::info!(booking_id = %id, "booking restored");
        }
        Ok(booking.clone())
    }

    pub fn booking(&self, id: &str) -> Option<Booking> {
        self.bookings
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    pub fn by_user(&self, user_id: &str) -> Vec<Booking> {
        self.bookings
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<Booking> {
        self.bookings.read().expect("ledger lock poisoned").clone()
    }

    /// Replaces the ledger from a snapshot and rebuilds the inventory from
    /// the Active bookings. A snapshot that has two active bookings sharing
    /// a seat is malformed; the earlier booking keeps its claim and later
    /// offenders are demoted to Cancelled rather than aborting startup.
    pub fn replace(&self, inventory: &SeatInventory, loaded: Vec<Booking>) {
        let mut bookings = self.bookings.write().expect("ledger lock poisoned");
        inventory.clear();
        bookings.clear();
        for mut booking in loaded {
            if booking.status == BookingStatus::Active {
                if let Err(err) =
                    inventory.try_claim(&booking.showtime_id, &booking.seats, &booking.id)
                {
                    tracing::warn!(
                        booking_id = %booking.id,
                        %err,
                        "snapshot booking overlaps an earlier claim; demoting to cancelled"
                    );
                    booking.status = BookingStatus::Cancelled;
                }
            }
            bookings.push(booking);
        }
    }
}

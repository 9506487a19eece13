use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::EngineError;

type ClaimedSeats = HashMap<String, String>;

/// Single source of truth for "which seats are taken, for which showtime,
/// right now". Claims are partitioned by showtime: the outer map is locked
/// only to find or create a showtime's slot, and every check-then-set runs
/// under that slot's own mutex. Traffic on different showtimes never
/// contends.
#[derive(Debug, Default)]
pub struct SeatInventory {
    shows: RwLock<HashMap<String, Arc<Mutex<ClaimedSeats>>>>,
}

impl SeatInventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, showtime_id: &str) -> Arc<Mutex<ClaimedSeats>> {
        if let Some(slot) = self
            .shows
            .read()
            .expect("seat inventory lock poisoned")
            .get(showtime_id)
        {
            return Arc::clone(slot);
        }
        let mut shows = self.shows.write().expect("seat inventory lock poisoned");
        Arc::clone(shows.entry(showtime_id.to_string()).or_default())
    }

    /// Snapshot of the claimed seat labels for one showtime. Unknown
    /// showtimes simply have no claims yet.
    pub fn booked_seats(&self, showtime_id: &str) -> BTreeSet<String> {
        let shows = self.shows.read().expect("seat inventory lock poisoned");
        match shows.get(showtime_id) {
            Some(slot) => slot
                .lock()
                .expect("seat claim lock poisoned")
                .keys()
                .cloned()
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Atomically claims all of `seats` for `booking_id`, or none of them.
    /// The overlap check and the insertion happen under one slot lock, so
    /// two interleaved requests can never both observe a seat as free.
    pub fn try_claim(
        &self,
        showtime_id: &str,
        seats: &BTreeSet<String>,
        booking_id: &str,
    ) -> Result<(), EngineError> {
        let slot = self.slot(showtime_id);
        let mut claimed = slot.lock().expect("seat claim lock poisoned");

        let taken: Vec<String> = seats
            .iter()
            .filter(|seat| claimed.contains_key(seat.as_str()))
            .cloned()
            .collect();
        if !taken.is_empty() {
            return Err(EngineError::SeatConflict { taken });
        }

        for seat in seats {
            claimed.insert(seat.clone(), booking_id.to_string());
        }
        tracing::debug!(
            showtime_id,
            booking_id,
            seats = seats.len(),
            "seats claimed"
        );
        Ok(())
    }

    /// Removes the given seats from the claimed set. Idempotent: releasing
    /// an already-free seat is a no-op, so cancellation always succeeds.
    pub fn release(&self, showtime_id: &str, seats: &BTreeSet<String>) {
        let shows = self.shows.read().expect("seat inventory lock poisoned");
        if let Some(slot) = shows.get(showtime_id) {
            let mut claimed = slot.lock().expect("seat claim lock poisoned");
            for seat in seats {
                claimed.remove(seat);
            }
        }
    }

    /// Drops every claim. Used when rehydrating from a snapshot.
    pub fn clear(&self) {
        self.shows
            .write()
            .expect("seat inventory lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    fn seats(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn claim_then_read_back() {
        let inventory = SeatInventory::new();
        inventory.try_claim("s1", &seats(&["A1", "A2"]), "b1").unwrap();
        assert_eq!(inventory.booked_seats("s1"), seats(&["A1", "A2"]));
        assert!(inventory.booked_seats("s2").is_empty());
    }

    #[test]
    fn overlapping_claim_is_rejected_and_claims_nothing() {
        let inventory = SeatInventory::new();
        inventory.try_claim("s1", &seats(&["A1"]), "b1").unwrap();

        let err = inventory
            .try_claim("s1", &seats(&["A1", "B1", "B2"]), "b2")
            .unwrap_err();
        assert!(matches!(err, EngineError::SeatConflict { taken } if taken == vec!["A1"]));

        // All-or-nothing: B1/B2 must not have been claimed.
        assert_eq!(inventory.booked_seats("s1"), seats(&["A1"]));
    }

    #[test]
    fn release_is_idempotent() {
        let inventory = SeatInventory::new();
        inventory.try_claim("s1", &seats(&["A1"]), "b1").unwrap();
        inventory.release("s1", &seats(&["A1", "Z9"]));
        inventory.release("s1", &seats(&["A1"]));
        inventory.release("never-seen", &seats(&["A1"]));
        assert!(inventory.booked_seats("s1").is_empty());
    }

    #[test]
    fn same_showtime_overlapping_claims_have_one_winner() {
        for _ in 0..50 {
            let inventory = Arc::new(SeatInventory::new());
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let inventory = Arc::clone(&inventory);
                    thread::spawn(move || {
                        inventory.try_claim("s1", &seats(&["A1", "A2"]), &format!("b{i}"))
                    })
                })
                .collect();
            let wins = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(Result::is_ok)
                .count();
            assert_eq!(wins, 1);
            assert_eq!(inventory.booked_seats("s1"), seats(&["A1", "A2"]));
        }
    }

    #[test]
    fn disjoint_concurrent_claims_all_succeed() {
        let inventory = Arc::new(SeatInventory::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let inventory = Arc::clone(&inventory);
                thread::spawn(move || {
                    let mine = seats(&[&format!("R{i}S1"), &format!("R{i}S2")]);
                    inventory.try_claim("s1", &mine, &format!("b{i}"))
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(inventory.booked_seats("s1").len(), 16);
    }

    proptest! {
        // Replaying any sequence of claim attempts must leave each seat
        // held by at most one booking, with every granted claim intact.
        #[test]
        fn no_seat_is_ever_double_claimed(
            requests in proptest::collection::vec(
                proptest::collection::btree_set("[A-C][1-4]", 1..4),
                1..12,
            )
        ) {
            let inventory = SeatInventory::new();
            let mut owners: HashMap<String, usize> = HashMap::new();

            for (i, request) in requests.iter().enumerate() {
                let request: BTreeSet<String> = request.clone();
                if inventory.try_claim("s1", &request, &format!("b{i}")).is_ok() {
                    for seat in &request {
                        prop_assert!(owners.insert(seat.clone(), i).is_none());
                    }
                }
            }

            let expected: BTreeSet<String> = owners.keys().cloned().collect();
            prop_assert_eq!(inventory.booked_seats("s1"), expected);
        }
    }
}

//! The booking engine: catalog, showtime registry, seat inventory and
//! booking ledger behind one facade. Constructed once in `main` and shared
//! through `AppState`; there is no global instance. All operations are
//! synchronous and complete (or fail) without suspending, so handlers can
//! call them directly.

pub mod analytics;
pub mod catalog;
pub mod inventory;
pub mod ledger;
pub mod showtimes;

use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::EngineError;
use crate::models::showtime::default_screen_type;
use crate::models::{
    Booking, BookingStatus, Cinema, Movie, NewBooking, NewCinema, NewMovie, NewShowtime, Showtime,
};

use analytics::AnalyticsReport;
use catalog::CatalogStore;
use inventory::SeatInventory;
use ledger::BookingLedger;
use showtimes::ShowtimeRegistry;

#[derive(Debug, Default)]
pub struct Engine {
    catalog: CatalogStore,
    registry: ShowtimeRegistry,
    inventory: SeatInventory,
    ledger: BookingLedger,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    // --- catalog ---

    pub fn add_movie(&self, new: NewMovie) -> Result<Movie, EngineError> {
        self.catalog.add_movie(new)
    }

    pub fn update_movie(&self, id: u32, new: NewMovie) -> Result<Movie, EngineError> {
        self.catalog.update_movie(id, new)
    }

    pub fn movie(&self, id: u32) -> Option<Movie> {
        self.catalog.movie(id)
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.catalog.movies()
    }

    pub fn add_cinema(&self, new: NewCinema) -> Result<Cinema, EngineError> {
        self.catalog.add_cinema(new)
    }

    pub fn update_cinema(&self, id: u32, new: NewCinema) -> Result<Cinema, EngineError> {
        self.catalog.update_cinema(id, new)
    }

    pub fn cinema(&self, id: u32) -> Option<Cinema> {
        self.catalog.cinema(id)
    }

    pub fn cinemas(&self) -> Vec<Cinema> {
        self.catalog.cinemas()
    }

    /// Deletes a cinema and drops its showtimes from the registry. Existing
    /// bookings are history and stay untouched.
    pub fn delete_cinema(&self, id: u32) -> Result<Cinema, EngineError> {
        let removed = self.catalog.delete_cinema(id)?;
        let dropped = self.registry.remove_by_cinema(id);
        if dropped > 0 {
            tracing::info!(cinema_id = id, showtimes = dropped, "dropped showtimes of deleted cinema");
        }
        Ok(removed)
    }

    // --- showtimes ---

    pub fn add_showtime(&self, new: NewShowtime) -> Result<Showtime, EngineError> {
        new.validate()?;
        let movie_id = new.movie_id.unwrap_or_default();
        let cinema_id = new.cinema_id.unwrap_or_default();

        if self.catalog.movie(movie_id).is_none() {
            return Err(EngineError::validation(format!(
                "movie {movie_id} does not exist"
            )));
        }
        // The cinema name is display-only and copied best-effort; an
        // unresolvable cinema leaves it empty rather than failing.
        let cinema_name = self
            .catalog
            .cinema(cinema_id)
            .map(|c| c.name)
            .unwrap_or_default();

        let showtime = Showtime {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            movie_id,
            cinema_id,
            cinema_name,
            date: new.date.unwrap_or_default(),
            time: new.time.unwrap_or_default(),
            screen_type: new.screen_type.unwrap_or_else(default_screen_type),
            price: new.price.unwrap_or_default(),
        };
        self.registry.add(showtime)
    }

    pub fn showtime(&self, id: &str) -> Option<Showtime> {
        self.registry.showtime(id)
    }

    pub fn showtimes_by_movie(&self, movie_id: u32) -> Vec<Showtime> {
        self.registry.by_movie(movie_id)
    }

    pub fn showtimes_by_date(&self, date: &str) -> Vec<Showtime> {
        self.registry.by_date(date)
    }

    pub fn showtimes_by_movie_and_date(&self, movie_id: u32, date: &str) -> Vec<Showtime> {
        self.registry.by_movie_and_date(movie_id, date)
    }

    pub fn showtimes_by_cinema(&self, cinema_id: u32) -> Vec<Showtime> {
        self.registry.by_cinema(cinema_id)
    }

    pub fn showtimes(&self) -> Vec<Showtime> {
        self.registry.all()
    }

    // --- seats & bookings ---

    pub fn booked_seats(&self, showtime_id: &str) -> BTreeSet<String> {
        self.inventory.booked_seats(showtime_id)
    }

    /// The sole path that claims seats for a new booking. Duplicate seat
    /// labels in the request collapse into one; an empty set is rejected
    /// before any state is touched.
    pub fn create_booking(&self, new: NewBooking) -> Result<Booking, EngineError> {
        new.validate()?;
        let seats: BTreeSet<String> = new
            .seats
            .unwrap_or_default()
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if seats.is_empty() {
            return Err(EngineError::validation("at least one seat is required"));
        }

        let showtime_id = new.showtime_id.unwrap_or_default();
        let movie_id = new.movie_id.unwrap_or_default();

        // Denormalized display fields, resolved best-effort: the showtime
        // and movie are looked up live, falling back to what the caller
        // sent. Their absence never blocks the claim.
        let showtime = self.registry.showtime(&showtime_id);
        let movie = self.catalog.movie(movie_id);

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id.unwrap_or_default(),
            movie_id,
            movie_title: movie
                .as_ref()
                .map(|m| m.title.clone())
                .or(new.movie_title)
                .unwrap_or_default(),
            movie_poster: movie
                .as_ref()
                .map(|m| m.poster.clone())
                .or(new.movie_poster)
                .unwrap_or_default(),
            showtime_id: showtime_id.clone(),
            showtime_date: showtime.as_ref().map(|s| s.date.clone()).unwrap_or_default(),
            showtime_time: showtime.as_ref().map(|s| s.time.clone()).unwrap_or_default(),
            cinema_id: showtime.as_ref().map(|s| s.cinema_id).unwrap_or_default(),
            cinema_name: showtime
                .as_ref()
                .map(|s| s.cinema_name.clone())
                .unwrap_or_default(),
            screen_type: showtime
                .as_ref()
                .map(|s| s.screen_type.clone())
                .unwrap_or_else(default_screen_type),
            seats,
            total_price: new.total_price.unwrap_or_default(),
            booking_date: Utc::now().date_naive(),
            status: BookingStatus::Active,
        };

        self.ledger.create(&self.inventory, booking)
    }

    pub fn cancel_booking(&self, id: &str) -> Result<Booking, EngineError> {
        self.ledger.cancel(&self.inventory, id)
    }

    pub fn restore_booking(&self, id: &str) -> Result<Booking, EngineError> {
        self.ledger.restore(&self.inventory, id)
    }

    pub fn booking(&self, id: &str) -> Option<Booking> {
        self.ledger.booking(id)
    }

    pub fn bookings_by_user(&self, user_id: &str) -> Vec<Booking> {
        self.ledger.by_user(user_id)
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.ledger.all()
    }

    // --- analytics & persistence glue ---

    pub fn analytics(&self) -> AnalyticsReport {
        analytics::report(&self.ledger.all())
    }

    pub fn hydrate_movies(&self, movies: Vec<Movie>) {
        self.catalog.replace_movies(movies);
    }

    pub fn hydrate_movie_if_missing(&self, movie: Movie) {
        self.catalog.backfill_movie(movie);
    }

    pub fn hydrate_cinemas(&self, cinemas: Vec<Cinema>, showtimes: Vec<Showtime>) {
        self.catalog.replace_cinemas(cinemas);
        self.registry.replace(showtimes);
    }

    /// Installs snapshot bookings and rebuilds the seat inventory from the
    /// Active ones, so the inventory is exactly the union of active seat
    /// sets by construction.
    pub fn hydrate_bookings(&self, bookings: Vec<Booking>) {
        for booking in &bookings {
            if self.catalog.movie(booking.movie_id).is_none() && !booking.movie_title.is_empty() {
                // Same backfill the snapshot loader has always done: a
                // booking can outlive its movie's catalog entry.
                self.catalog.backfill_movie(Movie {
                    id: booking.movie_id,
                    title: booking.movie_title.clone(),
                    description: String::new(),
                    poster: booking.movie_poster.clone(),
                    banner: String::new(),
                    rating: 0.0,
                    duration: String::new(),
                    release_date: String::new(),
                    genres: Vec::new(),
                    language: String::new(),
                    director: String::new(),
                    cast: Vec::new(),
                });
            }
        }
        self.ledger.replace(&self.inventory, bookings);
    }
}

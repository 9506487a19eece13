//! JSON snapshot store. The durable copy is load-at-start / save-on-
//! checkpoint only: it is never consulted while the engine is running, and
//! a failed write leaves the in-memory state authoritative.
//!
//! On-disk layout mirrors the historical data files: `movies.json` and
//! `bookings.json` are flat arrays, `cinemas.json` nests each cinema's
//! showtimes, and each booking embeds the details of its movie so old
//! readers keep working.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::error::EngineError;
use crate::models::{Booking, Cinema, Movie, Showtime};

const MOVIES_FILE: &str = "movies.json";
const CINEMAS_FILE: &str = "cinemas.json";
const BOOKINGS_FILE: &str = "bookings.json";

#[derive(Debug, Serialize, Deserialize)]
struct CinemaRecord {
    #[serde(flatten)]
    cinema: Cinema,
    #[serde(default)]
    showtimes: Vec<Showtime>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    #[serde(flatten)]
    booking: Booking,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    movie_details: Option<Movie>,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Hydrates the engine from the snapshot files. Missing files mean a
    /// fresh install and hydrate as empty; anything else (unreadable file,
    /// malformed JSON) is a PersistenceFailure for the caller to report.
    pub async fn load(&self, engine: &Engine) -> Result<(), EngineError> {
        let movies: Vec<Movie> = self.read_array(MOVIES_FILE).await?;
        info!(count = movies.len(), "loaded movies");
        engine.hydrate_movies(movies);

        let cinema_records: Vec<CinemaRecord> = self.read_array(CINEMAS_FILE).await?;
        let mut cinemas = Vec::with_capacity(cinema_records.len());
        let mut showtimes = Vec::new();
        for record in cinema_records {
            showtimes.extend(record.showtimes);
            cinemas.push(record.cinema);
        }
        info!(
            cinemas = cinemas.len(),
            showtimes = showtimes.len(),
            "loaded cinemas"
        );
        engine.hydrate_cinemas(cinemas, showtimes);

        let booking_records: Vec<BookingRecord> = self.read_array(BOOKINGS_FILE).await?;
        info!(count = booking_records.len(), "loaded bookings");
        let mut bookings = Vec::with_capacity(booking_records.len());
        for record in booking_records {
            if let Some(movie) = record.movie_details {
                engine.hydrate_movie_if_missing(movie);
            }
            bookings.push(record.booking);
        }
        engine.hydrate_bookings(bookings);
        Ok(())
    }

    /// Writes the full snapshot. Showtimes are grouped back under their
    /// cinema; a showtime whose cinema no longer resolves cannot be placed
    /// and is skipped with a warning.
    pub async fn save(&self, engine: &Engine) -> Result<(), EngineError> {
        fs::create_dir_all(&self.data_dir).await?;

        let movies = engine.movies();
        let movie_index: HashMap<u32, Movie> =
            movies.iter().map(|m| (m.id, m.clone())).collect();

        let mut by_cinema: HashMap<u32, Vec<Showtime>> = HashMap::new();
        for showtime in engine.showtimes() {
            by_cinema.entry(showtime.cinema_id).or_default().push(showtime);
        }

        let cinema_records: Vec<CinemaRecord> = engine
            .cinemas()
            .into_iter()
            .map(|cinema| {
                let showtimes = by_cinema.remove(&cinema.id).unwrap_or_default();
                CinemaRecord { cinema, showtimes }
            })
            .collect();
        for (cinema_id, orphans) in &by_cinema {
            warn!(
                cinema_id = *cinema_id,
                showtimes = orphans.len(),
                "showtimes reference an unknown cinema; not persisted"
            );
        }

        let booking_records: Vec<BookingRecord> = engine
            .bookings()
            .into_iter()
            .map(|booking| {
                let movie_details = movie_index.get(&booking.movie_id).cloned();
                BookingRecord {
                    booking,
                    movie_details,
                }
            })
            .collect();

        let (movies_res, cinemas_res, bookings_res) = futures::join!(
            self.write_array(MOVIES_FILE, &movies),
            self.write_array(CINEMAS_FILE, &cinema_records),
            self.write_array(BOOKINGS_FILE, &booking_records),
        );
        movies_res?;
        cinemas_res?;
        bookings_res?;

        info!(
            movies = movies.len(),
            cinemas = cinema_records.len(),
            bookings = booking_records.len(),
            "snapshot saved"
        );
        Ok(())
    }

    async fn read_array<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, EngineError> {
        let path = self.data_dir.join(name);
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(file = name, "no snapshot file yet; starting empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_array<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), EngineError> {
        let path = self.data_dir.join(name);
        let bytes = serde_json::to_vec_pretty(items)?;
        fs::write(&path, bytes).await?;
        Ok(())
    }
}

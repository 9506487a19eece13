use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::EngineError;
use crate::models::Showtime;

/// Index of showtimes by id, independent of the cinemas that host them.
/// Showtimes are immutable once registered; the registry only grows, except
/// when a cinema is deleted and takes its showtimes with it.
#[derive(Debug, Default)]
pub struct ShowtimeRegistry {
    shows: RwLock<HashMap<String, Showtime>>,
}

impl ShowtimeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fully-built showtime. Explicit duplicate ids are
    /// rejected; id generation happens upstream in the engine.
    pub fn add(&self, showtime: Showtime) -> Result<Showtime, EngineError> {
        let mut shows = self.shows.write().expect("showtime registry lock poisoned");
        if shows.contains_key(&showtime.id) {
            return Err(EngineError::validation(format!(
                "showtime id {} already exists",
                showtime.id
            )));
        }
        shows.insert(showtime.id.clone(), showtime.clone());
        tracing::info!(showtime_id = %showtime.id, cinema_id = showtime.cinema_id, "showtime added");
        Ok(showtime)
    }

    pub fn showtime(&self, id: &str) -> Option<Showtime> {
        self.shows
            .read()
            .expect("showtime registry lock poisoned")
            .get(id)
            .cloned()
    }

    pub fn by_movie(&self, movie_id: u32) -> Vec<Showtime> {
        self.filtered(|s| s.movie_id == movie_id)
    }

    pub fn by_date(&self, date: &str) -> Vec<Showtime> {
        self.filtered(|s| s.date == date)
    }

    pub fn by_movie_and_date(&self, movie_id: u32, date: &str) -> Vec<Showtime> {
        self.filtered(|s| s.movie_id == movie_id && s.date == date)
    }

    pub fn by_cinema(&self, cinema_id: u32) -> Vec<Showtime> {
        self.filtered(|s| s.cinema_id == cinema_id)
    }

    pub fn all(&self) -> Vec<Showtime> {
        self.filtered(|_| true)
    }

    fn filtered(&self, keep: impl Fn(&Showtime) -> bool) -> Vec<Showtime> {
        let shows = self.shows.read().expect("showtime registry lock poisoned");
        let mut result: Vec<Showtime> = shows.values().filter(|s| keep(s)).cloned().collect();
        // HashMap iteration order is arbitrary; keep listings stable.
        result.sort_by(|a, b| (&a.date, &a.time, &a.id).cmp(&(&b.date, &b.time, &b.id)));
        result
    }

    /// Drops every showtime hosted by the given cinema. Returns how many
    /// were removed.
    pub fn remove_by_cinema(&self, cinema_id: u32) -> usize {
        let mut shows = self.shows.write().expect("showtime registry lock poisoned");
        let before = shows.len();
        shows.retain(|_, s| s.cinema_id != cinema_id);
        before - shows.len()
    }

    pub fn replace(&self, loaded: Vec<Showtime>) {
        let mut shows = self.shows.write().expect("showtime registry lock poisoned");
        shows.clear();
        for showtime in loaded {
            shows.insert(showtime.id.clone(), showtime);
        }
    }
}

use std::sync::RwLock;

use validator::Validate;

use crate::error::EngineError;
use crate::models::{Cinema, Movie, NewCinema, NewMovie};

/// Keyed collections of movies and cinemas. The only concurrency hazard
/// here is id assignment: new ids are max(existing)+1 computed at insert
/// time, so the compute-and-insert runs as one write-lock section per
/// store. Reads clone a snapshot and never block each other.
#[derive(Debug, Default)]
pub struct CatalogStore {
    movies: RwLock<Vec<Movie>>,
    cinemas: RwLock<Vec<Cinema>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- movies ---

    pub fn add_movie(&self, new: NewMovie) -> Result<Movie, EngineError> {
        new.validate()?;
        let mut movies = self.movies.write().expect("catalog lock poisoned");
        let id = movies.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let movie = Movie::from_new(id, new);
        movies.push(movie.clone());
        tracing::info!(movie_id = id, title = %movie.title, "movie added");
        Ok(movie)
    }

    pub fn update_movie(&self, id: u32, new: NewMovie) -> Result<Movie, EngineError> {
        new.validate()?;
        let mut movies = self.movies.write().expect("catalog lock poisoned");
        let slot = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EngineError::not_found("movie", id.to_string()))?;
        *slot = Movie::from_new(id, new);
        Ok(slot.clone())
    }

    pub fn movie(&self, id: u32) -> Option<Movie> {
        self.movies
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.movies.read().expect("catalog lock poisoned").clone()
    }

    /// Inserts a fully-formed movie only if its id is unknown. Used when a
    /// snapshot's bookings reference movies missing from movies.json.
    pub fn backfill_movie(&self, movie: Movie) {
        let mut movies = self.movies.write().expect("catalog lock poisoned");
        if !movies.iter().any(|m| m.id == movie.id) {
            tracing::debug!(movie_id = movie.id, "backfilled movie from booking snapshot");
            movies.push(movie);
        }
    }

    pub fn replace_movies(&self, loaded: Vec<Movie>) {
        *self.movies.write().expect("catalog lock poisoned") = loaded;
    }

    // --- cinemas ---

    pub fn add_cinema(&self, new: NewCinema) -> Result<Cinema, EngineError> {
        new.validate()?;
        let mut cinemas = self.cinemas.write().expect("catalog lock poisoned");
        let id = cinemas.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let cinema = Cinema::from_new(id, new);
        cinemas.push(cinema.clone());
        tracing::info!(cinema_id = id, name = %cinema.name, "cinema added");
        Ok(cinema)
    }

    pub fn update_cinema(&self, id: u32, new: NewCinema) -> Result<Cinema, EngineError> {
        new.validate()?;
        let mut cinemas = self.cinemas.write().expect("catalog lock poisoned");
        let slot = cinemas
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::not_found("cinema", id.to_string()))?;
        *slot = Cinema::from_new(id, new);
        tracing::info!(cinema_id = id, "cinema updated");
        Ok(slot.clone())
    }

    pub fn cinema(&self, id: u32) -> Option<Cinema> {
        self.cinemas
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn cinemas(&self) -> Vec<Cinema> {
        self.cinemas.read().expect("catalog lock poisoned").clone()
    }

    pub fn delete_cinema(&self, id: u32) -> Result<Cinema, EngineError> {
        let mut cinemas = self.cinemas.write().expect("catalog lock poisoned");
        let position = cinemas
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| EngineError::not_found("cinema", id.to_string()))?;
        let removed = cinemas.remove(position);
        tracing::info!(cinema_id = id, "cinema deleted");
        Ok(removed)
    }

    pub fn replace_cinemas(&self, loaded: Vec<Cinema>) {
        *self.cinemas.write().expect("catalog lock poisoned") = loaded;
    }
}

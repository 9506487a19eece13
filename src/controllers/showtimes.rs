use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::EngineError;
use crate::models::{NewShowtime, Showtime};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/showtimes", get(list_showtimes).post(create_showtime))
        .route("/showtimes/{id}", get(get_showtime))
        .route("/showtimes/{id}/seats", get(booked_seats))
}

#[derive(Debug, Deserialize)]
pub struct ShowtimesQuery {
    #[serde(rename = "movieId")]
    pub movie_id: Option<u32>,
    pub date: Option<String>,
}

// GET /api/showtimes?movieId=..&date=..
async fn list_showtimes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShowtimesQuery>,
) -> Json<Vec<Showtime>> {
    let result = match (params.movie_id, params.date.as_deref()) {
        (Some(movie_id), Some(date)) => state.engine.showtimes_by_movie_and_date(movie_id, date),
        (Some(movie_id), None) => state.engine.showtimes_by_movie(movie_id),
        (None, Some(date)) => state.engine.showtimes_by_date(date),
        (None, None) => state.engine.showtimes(),
    };
    Json(result)
}

// POST /api/showtimes
async fn create_showtime(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewShowtime>,
) -> Result<impl IntoResponse, EngineError> {
    let showtime = state.engine.add_showtime(payload)?;
    Ok((StatusCode::CREATED, Json(showtime)))
}

// GET /api/showtimes/{id}
async fn get_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Showtime>, EngineError> {
    state
        .engine
        .showtime(&id)
        .map(Json)
        .ok_or_else(|| EngineError::not_found("showtime", id))
}

// GET /api/showtimes/{id}/seats
//
// Unknown showtimes report an empty set rather than 404: a showtime with
// no bookings and a showtime the engine has never seen are the same thing
// to a seat map.
async fn booked_seats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<BTreeSet<String>> {
    Json(state.engine.booked_seats(&id))
}

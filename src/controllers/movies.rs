use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::EngineError;
use crate::models::{Movie, NewMovie};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie).put(update_movie))
}

// GET /api/movies
async fn list_movies(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.engine.movies())
}

// POST /api/movies
async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMovie>,
) -> Result<impl IntoResponse, EngineError> {
    let movie = state.engine.add_movie(payload)?;
    Ok((StatusCode::CREATED, Json(movie)))
}

// GET /api/movies/{id}
async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Movie>, EngineError> {
    state
        .engine
        .movie(id)
        .map(Json)
        .ok_or_else(|| EngineError::not_found("movie", id.to_string()))
}

// PUT /api/movies/{id}
async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(payload): Json<NewMovie>,
) -> Result<Json<Movie>, EngineError> {
    Ok(Json(state.engine.update_movie(id, payload)?))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::EngineError;
use crate::models::{Cinema, NewCinema, Showtime};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cinemas", get(list_cinemas).post(create_cinema))
        .route(
            "/cinemas/{id}",
            get(get_cinema).put(update_cinema).delete(delete_cinema),
        )
        .route("/cinemas/{id}/showtimes", get(cinema_showtimes))
}

// GET /api/cinemas
async fn list_cinemas(State(state): State<Arc<AppState>>) -> Json<Vec<Cinema>> {
    Json(state.engine.cinemas())
}

// POST /api/cinemas
async fn create_cinema(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCinema>,
) -> Result<impl IntoResponse, EngineError> {
    let cinema = state.engine.add_cinema(payload)?;
    Ok((StatusCode::CREATED, Json(cinema)))
}

// GET /api/cinemas/{id}
async fn get_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Cinema>, EngineError> {
    state
        .engine
        .cinema(id)
        .map(Json)
        .ok_or_else(|| EngineError::not_found("cinema", id.to_string()))
}

// PUT /api/cinemas/{id}
async fn update_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(payload): Json<NewCinema>,
) -> Result<Json<Cinema>, EngineError> {
    Ok(Json(state.engine.update_cinema(id, payload)?))
}

// DELETE /api/cinemas/{id}
async fn delete_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse, EngineError> {
    state.engine.delete_cinema(id)?;
    Ok(Json(json!({ "message": "cinema deleted" })))
}

// GET /api/cinemas/{id}/showtimes
async fn cinema_showtimes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Showtime>>, EngineError> {
    if state.engine.cinema(id).is_none() {
        return Err(EngineError::not_found("cinema", id.to_string()));
    }
    Ok(Json(state.engine.showtimes_by_cinema(id)))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::EngineError;
use crate::models::{Booking, NewBooking};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/restore", post(restore_booking))
        .route("/users/{user_id}/bookings", get(user_bookings))
        .route("/admin/bookings", get(all_bookings))
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBooking>,
) -> Result<impl IntoResponse, EngineError> {
    let booking = state.engine.create_booking(payload)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, EngineError> {
    state
        .engine
        .booking(&id)
        .map(Json)
        .ok_or_else(|| EngineError::not_found("booking", id))
}

// POST /api/bookings/{id}/cancel
async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, EngineError> {
    Ok(Json(state.engine.cancel_booking(&id)?))
}

// POST /api/bookings/{id}/restore
async fn restore_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, EngineError> {
    Ok(Json(state.engine.restore_booking(&id)?))
}

// GET /api/users/{user_id}/bookings
async fn user_bookings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<Booking>> {
    Json(state.engine.bookings_by_user(&user_id))
}

// GET /api/admin/bookings
async fn all_bookings(State(state): State<Arc<AppState>>) -> Json<Vec<Booking>> {
    Json(state.engine.bookings())
}

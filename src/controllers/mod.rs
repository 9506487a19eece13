pub mod analytics;
pub mod bookings;
pub mod cinemas;
pub mod movies;
pub mod showtimes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(status))
        .merge(movies::routes())
        .merge(cinemas::routes())
        .merge(showtimes::routes())
        .merge(bookings::routes())
        .merge(analytics::routes())
}

async fn status() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::engine::analytics::AnalyticsReport;
use crate::error::EngineError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/analytics", get(get_analytics))
        .route("/admin/save", post(save_snapshot))
}

// GET /api/admin/analytics
async fn get_analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsReport> {
    Json(state.engine.analytics())
}

// POST /api/admin/save
//
// Manual snapshot checkpoint. A write failure surfaces as a 500 but the
// in-memory state is untouched and the next autosave will retry.
async fn save_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, EngineError> {
    state.store.save(&state.engine).await?;
    Ok(Json(json!({ "message": "snapshot saved" })))
}

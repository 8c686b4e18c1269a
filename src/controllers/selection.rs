use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

// Эти маршруты не зависят от площадки и работают в любом состоянии загрузки
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/selection", get(get_selection).delete(clear_selection))
        .route("/selection/{seat_id}", delete(remove_seat))
        .route("/summary", get(get_summary))
}

// GET /api/selection
async fn get_selection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.coordinator.selected_seats().await)
}

// DELETE /api/selection/{seat_id}
async fn remove_seat(
    State(state): State<Arc<AppState>>,
    Path(seat_id): Path<String>,
) -> impl IntoResponse {
    let removed = state.coordinator.remove_seat(&seat_id).await;
    Json(json!({
        "success": true,
        "removed": removed,
        "summary": state.coordinator.summary().await,
    }))
}

// DELETE /api/selection
async fn clear_selection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.coordinator.clear_selection().await;
    Json(json!({
        "success": true,
        "summary": state.coordinator.summary().await,
    }))
}

// GET /api/summary
async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.coordinator.summary().await)
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use super::ApiResult;
use crate::services::selection::ToggleOutcome;
use crate::views::SummaryView;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats/{seat_id}/select", post(select_seat))
        .route("/seats/{seat_id}/focus", post(focus_seat))
        .route("/focus", delete(blur_seat))
        .route("/popover", get(get_popover))
}

// POST /api/seats/{seat_id}/select
#[derive(Debug, Serialize)]
struct SelectResponse {
    success: bool,
    seat_id: String,
    outcome: ToggleOutcome,
    changed: bool,
    summary: SummaryView,
}

async fn select_seat(
    State(state): State<Arc<AppState>>,
    Path(seat_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.coordinator.select_seat(&seat_id).await?;
    // Лимит это не ошибка: отвечаем 200, клиент видит outcome = at_capacity
    let summary = state.coordinator.summary().await;

    Ok(Json(SelectResponse {
        success: true,
        changed: outcome.changed(),
        seat_id,
        outcome,
        summary,
    }))
}

// POST /api/seats/{seat_id}/focus
async fn focus_seat(
    State(state): State<Arc<AppState>>,
    Path(seat_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let popover = state.coordinator.focus_seat(&seat_id).await?;
    Ok(Json(popover))
}

// DELETE /api/focus
async fn blur_seat(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.coordinator.blur().await;
    StatusCode::NO_CONTENT
}

// GET /api/popover
async fn get_popover(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.coordinator.popover().await)
}

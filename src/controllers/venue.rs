use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ApiResult;
use crate::coordinator::LoadState;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(get_status))
        .route("/venue", get(get_venue))
        .route("/scene", get(get_scene))
        .route("/map.svg", get(get_map_svg))
}

// GET /api/status
#[derive(Debug, Serialize)]
struct StatusResponse {
    state: &'static str,
    message: Option<String>,
    venue_name: Option<String>,
    total_seats: Option<usize>,
    seats_by_status: Option<BTreeMap<&'static str, usize>>,
    selected: usize,
    max_selected: usize,
}

async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let load_state = state.coordinator.load_state().await;
    let selection = state.coordinator.selection();

    let mut resp = StatusResponse {
        state: load_state.name(),
        message: None,
        venue_name: None,
        total_seats: None,
        seats_by_status: None,
        selected: selection.len().await,
        max_selected: selection.max(),
    };

    match load_state {
        LoadState::Loading => resp.message = Some("Loading venue data...".to_string()),
        LoadState::Failed(message) => resp.message = Some(message),
        LoadState::Ready(venue) => {
            resp.venue_name = Some(venue.name.clone());
            resp.total_seats = Some(venue.seat_count());
            resp.seats_by_status = Some(
                venue
                    .status_counts()
                    .into_iter()
                    .map(|(status, count)| (status.as_str(), count))
                    .collect(),
            );
        }
    }

    Json(resp)
}

// GET /api/venue
async fn get_venue(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let venue = state.coordinator.venue().await?;
    Ok(Json(venue.as_ref().clone()))
}

// GET /api/scene
async fn get_scene(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let scene = state.coordinator.scene().await?;
    Ok(Json(scene))
}

// GET /api/map.svg
async fn get_map_svg(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let svg = state.coordinator.svg().await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

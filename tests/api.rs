//! Router-level tests: the coordinator wired to HTTP, driven with `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use seating_chart::config::Config;
use seating_chart::services::venue_loader::{parse_venue, LoadFailure};
use seating_chart::storage::MemoryStorage;
use seating_chart::{router, AppState};

// =============================================================================
// HELPERS
// =============================================================================

async fn app_state() -> Arc<AppState> {
    let config = Config::from_defaults().unwrap();
    AppState::with_storage(config, Arc::new(MemoryStorage::new())).await
}

async fn ready_state() -> Arc<AppState> {
    let state = app_state().await;
    let venue = parse_venue(include_str!("fixtures/venue_small.json")).unwrap();
    state.coordinator.finish_load(Ok(venue)).await;
    state
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// =============================================================================
// LOAD STATES
// =============================================================================

#[tokio::test]
async fn venue_routes_answer_503_while_loading() {
    let app = router(app_state().await);

    let (status, body) = send(&app, Method::GET, "/api/scene").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::GET, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "loading");
}

#[tokio::test]
async fn load_failure_is_a_blocking_error() {
    let state = app_state().await;
    state
        .coordinator
        .finish_load(Err(LoadFailure::Parse("unexpected token".into())))
        .await;
    let app = router(state);

    let (status, body) = send(&app, Method::POST, "/api/seats/A-1-01/select").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("unexpected token"));

    let (_, body) = send(&app, Method::GET, "/api/status").await;
    assert_eq!(body["state"], "error");

    // выбор без площадки всё равно доступен
    let (status, body) = send(&app, Method::GET, "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

// =============================================================================
// SELECTION FLOW
// =============================================================================

#[tokio::test]
async fn select_remove_and_clear_through_http() {
    let app = router(ready_state().await);

    let (status, body) = send(&app, Method::POST, "/api/seats/A-1-01/select").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "added");

    let (_, body) = send(&app, Method::POST, "/api/seats/A-1-02/select").await;
    assert_eq!(body["summary"]["total"], 250);
    assert_eq!(body["summary"]["count_label"], "2 / 8");

    let (_, body) = send(&app, Method::DELETE, "/api/selection/A-1-01").await;
    assert_eq!(body["removed"], true);
    assert_eq!(body["summary"]["total"], 100);

    let (_, body) = send(&app, Method::DELETE, "/api/selection").await;
    assert_eq!(body["summary"]["count"], 0);
    assert_eq!(body["summary"]["show_clear_all"], false);

    let (_, body) = send(&app, Method::GET, "/api/selection").await;
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn sold_and_unknown_seats_are_rejected() {
    let app = router(ready_state().await);

    let (status, _) = send(&app, Method::POST, "/api/seats/A-1-04/select").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::POST, "/api/seats/Z-1-01/select").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/summary").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn capacity_is_reported_as_outcome_not_error() {
    let app = router(ready_state().await);
    let seats = [
        "A-1-01", "A-1-02", "A-1-03", "A-2-01", "A-2-02", "A-2-03", "A-3-01", "A-3-02",
    ];
    for id in seats {
        let (status, _) = send(&app, Method::POST, &format!("/api/seats/{}/select", id)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::POST, "/api/seats/A-3-03/select").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "at_capacity");
    assert_eq!(body["changed"], false);
    assert_eq!(body["summary"]["count"], 8);
}

#[tokio::test]
async fn seat_limit_ignores_environment_overrides() {
    std::env::set_var("SEATING__SELECTION__MAX_SEATS", "20");
    let config = Config::load().unwrap();
    std::env::remove_var("SEATING__SELECTION__MAX_SEATS");

    let state = AppState::with_storage(config, Arc::new(MemoryStorage::new())).await;
    let venue = parse_venue(include_str!("fixtures/venue_small.json")).unwrap();
    state.coordinator.finish_load(Ok(venue)).await;

    let seats = [
        "A-1-01", "A-1-02", "A-1-03", "A-2-01", "A-2-02", "A-2-03", "A-3-01", "A-3-02", "A-3-03",
        "A-3-04", "B-1-01", "B-1-02",
    ];
    for id in seats {
        let _ = state.coordinator.select_seat(id).await;
    }

    assert_eq!(state.coordinator.selection().max(), 8);
    assert_eq!(state.coordinator.selected_seats().await.len(), 8);
}

// =============================================================================
// RENDERING & POPOVER
// =============================================================================

#[tokio::test]
async fn map_svg_reflects_selection() {
    let app = router(ready_state().await);
    send(&app, Method::POST, "/api/seats/B-1-01/select").await;

    let request = Request::builder().uri("/api/map.svg").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");

    let svg = String::from_utf8(to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert_eq!(svg.matches("<circle").count(), 24);
    assert_eq!(svg.matches("seat-selected").count(), 1);

    let (_, scene) = send(&app, Method::GET, "/api/scene").await;
    assert_eq!(scene["sections"][1]["seats"][0]["selected"], true);
}

#[tokio::test]
async fn focus_and_blur_drive_the_popover() {
    let app = router(ready_state().await);

    let (status, body) = send(&app, Method::POST, "/api/seats/B-2-03/focus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Section B • Row 2 • Seat 3");

    let (_, body) = send(&app, Method::GET, "/api/popover").await;
    assert_eq!(body["seat_id"], "B-2-03");

    let (status, _) = send(&app, Method::DELETE, "/api/focus").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/popover").await;
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::POST, "/api/seats/B-3-01/focus").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

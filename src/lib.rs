pub mod config;
pub mod controllers;
pub mod coordinator;
pub mod models;
pub mod render;
pub mod services;
pub mod storage;
pub mod views;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::coordinator::Coordinator;
use crate::render::SceneRenderer;
use crate::services::selection::SelectionStore;
use crate::services::venue_loader::VenueLoader;
use crate::storage::Storage;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub coordinator: Arc<Coordinator>,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let storage = storage::from_config(&config.storage).await?;
        let state = Self::with_storage(config, storage).await;

        // Загрузка площадки в фоне, до её завершения сессия в состоянии loading
        let loader = VenueLoader::from_config(&state.config.venue);
        state.coordinator.spawn_load(loader);

        Ok(state)
    }

    /// Собрать состояние без запуска загрузки (загрузку завершают через координатор).
    pub async fn with_storage(config: config::Config, storage: Arc<dyn Storage>) -> Arc<Self> {
        let selection = SelectionStore::restore(storage, config.storage.key.clone()).await;
        let coordinator = Arc::new(Coordinator::new(selection, SceneRenderer::default()));
        Arc::new(Self { config, coordinator })
    }
}

/// Главный роутер приложения.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Seating Chart API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

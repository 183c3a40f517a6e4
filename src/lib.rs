pub mod config;
pub mod controllers;
pub mod models;
pub mod seating;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::seating::SeatEngine;

// Shared state для всего приложения
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::Config,
    pub engine: SeatEngine,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let engine = SeatEngine::new(config.engine.clone());
        Arc::new(Self { config, engine })
    }
}

/// Главный роутер сервиса со всеми слоями.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Seat Engine API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Маршруты контроллеров
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

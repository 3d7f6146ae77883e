use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod actions;
pub mod config;
pub mod connections;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
pub mod sweeper;

use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(routes::websocket::websocket_handler))
        .route("/health", get(routes::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

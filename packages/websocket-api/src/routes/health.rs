use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub rooms: usize,
}

#[tracing::instrument(skip_all)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        rooms: state.session_store.room_count().await,
    })
}

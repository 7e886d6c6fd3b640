use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{core::app_state::AppState, routes::health::health_response::HealthResponse};

/// Handler: GET /health
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let kb = state.qa.snapshot().await;
    Json(HealthResponse {
        ok: kb.is_ready(),
        pairs: kb.pairs(),
    })
}

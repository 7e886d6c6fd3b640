use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::reload::reload_response::ReloadResponse,
};

/// Handler: POST /api/reload
///
/// Rebuilds corpus and index from the configured data file and swaps them in.
#[instrument(
    name = "reload_route",
    skip(state),
    fields(path = %state.qa.config().data_path.display())
)]
pub async fn reload_route(State(state): State<Arc<AppState>>) -> AppResult<Json<ReloadResponse>> {
    let pairs = state.qa.reload().await?;
    info!(target: "api::reload", pairs, "reload_route: reloaded");
    Ok(Json(ReloadResponse {
        status: "reloaded",
        pairs,
    }))
}

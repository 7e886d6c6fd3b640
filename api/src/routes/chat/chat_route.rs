//! POST /api/chat — rule match or best dataset answer.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::{debug, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::chat::{chat_request::ChatRequest, chat_response::ChatResponse},
};

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"what is your return policy"}'
/// ```
#[instrument(name = "chat_route", skip(state, headers, payload))]
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let Json(body) = payload?;
    let message = body.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(AppError::BadRequest("empty message".into()));
    }

    let reply = state.qa.chat(message).await;

    debug!(
        target: "api::chat",
        request_id = %request_id,
        source = ?reply.source,
        score = ?reply.score,
        "chat_route: replied"
    );

    Ok(Json(reply.into()))
}

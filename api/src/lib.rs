use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    core::app_state::{AppState, api_address},
    error_handler::{AppError, AppResult},
    middleware_layer::cors::permissive_cors,
    routes::{
        chat::chat_route::chat_route, health::health_route::health_route,
        reload::reload_route::reload_route,
    },
};

/// Build the HTTP router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/api/chat", post(chat_route))
        .route("/api/reload", post(reload_route))
        .fallback(|| async { AppError::NotFound })
        .layer(TraceLayer::new_for_http())
        .layer(permissive_cors())
        .with_state(state)
}

/// Load state from the environment and serve until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = api_address();
    let state = Arc::new(AppState::from_env().await?);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(target: "api::server", address = %host_url, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!(target: "api::server", "server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(target: "api::server", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

use qa_retriever::{QaService, RetrieverConfig};

use crate::error_handler::{AppError, AppResult};

/// Default listen address when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";

/// Shared state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Rules, current knowledge base snapshot and reload.
    pub qa: QaService,
}

impl AppState {
    pub fn new(qa: QaService) -> Self {
        Self { qa }
    }

    /// Load retriever config from the environment and build the initial snapshot.
    pub async fn from_env() -> AppResult<Self> {
        let config = RetrieverConfig::from_env().map_err(AppError::Config)?;
        let qa = QaService::start(config).await.map_err(AppError::Config)?;
        Ok(Self::new(qa))
    }
}

/// Listen address from `API_ADDRESS`, falling back to [`DEFAULT_API_ADDRESS`].
pub fn api_address() -> String {
    std::env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string())
}

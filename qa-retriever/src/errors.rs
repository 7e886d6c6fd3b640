//! Unified error type for the qa-retriever crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RetrieverError>;

/// Errors produced while configuring the retriever or reading its inputs.
///
/// Corpus problems never surface as errors to callers of
/// [`crate::corpus::load_corpus`]; they are logged and collapse into an empty
/// corpus. The variants below are used internally by the loader and by the
/// operator-facing configuration paths.
#[derive(Debug, Error)]
pub enum RetrieverError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration value is outside its allowed domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O & filesystem ────────────────────────────────────────────────────
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // ── JSON / data shape ───────────────────────────────────────────────────
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset parsed as JSON but the top-level value is not an array.
    #[error("dataset must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    // ── Runtime ─────────────────────────────────────────────────────────────
    /// A blocking rebuild task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

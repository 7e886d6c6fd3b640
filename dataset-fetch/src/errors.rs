//! Errors for dataset fetching.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Underlying HTTP transport error.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status for a candidate file.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Candidate parsed but held no usable records.
    #[error("no valid QA pairs in {0}")]
    NoPairs(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Every candidate failed; the output file was left untouched.
    #[error("could not auto-download dataset from any of {0} candidates")]
    Exhausted(usize),
}

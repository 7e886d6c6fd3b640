//! Fetcher configuration (environment driven).

use std::path::PathBuf;

use crate::errors::FetchError;

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/FareedKhan-dev/AI-Chatbot-Conversation-Dataset/main/";

/// Candidate file names, tried in order.
pub const CANDIDATES: &[&str] = &[
    "conversations.json",
    "dataset.json",
    "intents.json",
    "chatbot_dataset.json",
    "data.json",
];

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Base URL the candidate names are appended to.
    pub base_url: String,
    pub candidates: Vec<String>,
    /// Destination file, usually the server's `QA_DATA_PATH`.
    pub out: PathBuf,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            candidates: CANDIDATES.iter().map(|c| c.to_string()).collect(),
            out: PathBuf::from(qa_retriever::config::DEFAULT_DATA_PATH),
            timeout_secs: 10,
        }
    }
}

impl FetchConfig {
    /// Environment variables used:
    /// - `DATASET_BASE_URL` (default: the public conversation dataset repo)
    /// - `DATASET_OUT` (default: `data/conversations.json`)
    /// - `DATASET_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, FetchError> {
        let defaults = Self::default();
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let timeout_secs = match var("DATASET_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|_| FetchError::EnvParse {
                key: "DATASET_TIMEOUT_SECS".into(),
                value: v,
            })?,
            None => defaults.timeout_secs,
        };

        Ok(Self {
            base_url: var("DATASET_BASE_URL").unwrap_or(defaults.base_url),
            candidates: defaults.candidates,
            out: var("DATASET_OUT").map(PathBuf::from).unwrap_or(defaults.out),
            timeout_secs,
        })
    }

    /// Full URL for a candidate name.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

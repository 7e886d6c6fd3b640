//! Configuration layer: reads runtime settings from environment variables
//! and exposes a strongly typed config for loading and matching.

use std::path::PathBuf;

use crate::errors::{Result, RetrieverError};
use crate::tokenizer::Analyzer;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/conversations.json";

/// Default minimum similarity for a retrieval answer.
pub const DEFAULT_THRESHOLD: f32 = 0.20;

/// Runtime configuration for the retriever and the chat pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieverConfig {
    /// JSON dataset with question/answer records.
    pub data_path: PathBuf,
    /// Minimum similarity (inclusive) required to answer from the dataset.
    pub threshold: f32,
    /// Drop English stop words before building unigrams/bigrams.
    pub stop_words: bool,
    /// Optional JSON file replacing the built-in keyword rules.
    pub rules_path: Option<PathBuf>,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            threshold: DEFAULT_THRESHOLD,
            stop_words: true,
            rules_path: None,
        }
    }
}

impl RetrieverConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `QA_DATA_PATH` (default: `data/conversations.json`)
    /// - `QA_THRESHOLD` (default: `0.20`, range `0.0..=1.0`)
    /// - `QA_STOP_WORDS` (default: `true`)
    /// - `QA_RULES_PATH` (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`RetrieverConfig::from_env`] but with an injectable lookup.
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let data_path = non_empty("QA_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let threshold = match non_empty("QA_THRESHOLD") {
            Some(v) => parse_value::<f32>("QA_THRESHOLD", &v)?,
            None => defaults.threshold,
        };

        let stop_words = match non_empty("QA_STOP_WORDS") {
            Some(v) => parse_value::<bool>("QA_STOP_WORDS", &v.to_lowercase())?,
            None => defaults.stop_words,
        };

        let rules_path = non_empty("QA_RULES_PATH").map(PathBuf::from);

        let cfg = Self {
            data_path,
            threshold,
            stop_words,
            rules_path,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold)) {
            return Err(RetrieverError::InvalidConfig(format!(
                "QA_THRESHOLD must be within 0.0..=1.0, got {}",
                self.threshold
            )));
        }
        if self.data_path.as_os_str().is_empty() {
            return Err(RetrieverError::InvalidConfig("QA_DATA_PATH is empty".into()));
        }
        Ok(())
    }

    /// Text analyzer matching this configuration.
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.stop_words)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| RetrieverError::EnvParse {
        key: key.into(),
        value: value.into(),
    })
}

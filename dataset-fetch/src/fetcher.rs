//! Try each candidate URL in order; persist the first usable dataset.

use std::{path::Path, time::Duration};

use qa_retriever::corpus::QaPair;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{config::FetchConfig, errors::FetchError, normalize::normalize};

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Candidate file name that produced the dataset.
    pub source: String,
    pub pairs: usize,
}

/// Download the first candidate that yields pairs and write it to `cfg.out`.
///
/// The output file is replaced atomically and only on success.
pub async fn fetch_dataset(cfg: &FetchConfig) -> Result<FetchOutcome, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()?;

    for name in &cfg.candidates {
        let url = cfg.url_for(name);
        match fetch_candidate(&client, &url).await {
            Ok(pairs) => {
                info!(target: "dataset_fetch", %url, pairs = pairs.len(), "found dataset");
                write_pairs(&cfg.out, &pairs)?;
                info!(target: "dataset_fetch", out = %cfg.out.display(), "saved dataset");
                return Ok(FetchOutcome {
                    source: name.clone(),
                    pairs: pairs.len(),
                });
            }
            Err(err) => {
                warn!(target: "dataset_fetch", %url, error = %err, "candidate skipped");
            }
        }
    }

    warn!(
        target: "dataset_fetch",
        out = %cfg.out.display(),
        "could not auto-download dataset; place it manually"
    );
    Err(FetchError::Exhausted(cfg.candidates.len()))
}

async fn fetch_candidate(client: &reqwest::Client, url: &str) -> Result<Vec<QaPair>, FetchError> {
    let res = client.get(url).send().await?;
    let status = res.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let text = res.text().await?;
    let pairs = normalize(serde_json::from_str(&text)?);
    if pairs.is_empty() {
        return Err(FetchError::NoPairs(url.to_string()));
    }
    Ok(pairs)
}

/// Pretty-print `pairs` to a temp file beside `out`, then move it into place.
pub fn write_pairs(out: &Path, pairs: &[QaPair]) -> Result<(), FetchError> {
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, pairs)?;
    tmp.persist(out).map_err(|e| FetchError::Io(e.error))?;
    Ok(())
}

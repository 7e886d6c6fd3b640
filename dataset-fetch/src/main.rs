use dataset_fetch::{FetchConfig, fetch_dataset};
use qa_retriever::telemetry;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_TARGETS: &[&str] = &["dataset_fetch", "qa_retriever"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional; real environment variables always win.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer(LOG_TARGETS))
        .try_init()?;

    if let Err(err) = dotenv {
        debug!(target: "dataset_fetch", error = %err, "no .env file loaded");
    }

    let cfg = FetchConfig::from_env()?;
    let outcome = fetch_dataset(&cfg).await?;

    info!(
        target: "dataset_fetch",
        source = %outcome.source,
        pairs = outcome.pairs,
        out = %cfg.out.display(),
        "dataset ready; call POST /api/reload to pick it up"
    );
    Ok(())
}

use std::error::Error;

use qa_retriever::telemetry;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Targets rendered by the log layer: this binary's crates plus HTTP traces.
const LOG_TARGETS: &[&str] = &["qa_chatbot", "api", "qa_retriever", "tower_http"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // `.env` is optional; real environment variables always win.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer(LOG_TARGETS))
        .try_init()?;

    if let Err(err) = dotenv {
        debug!(target: "qa_chatbot", error = %err, "no .env file loaded");
    }

    api::start().await?;

    Ok(())
}

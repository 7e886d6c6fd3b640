//! Operational helper that populates the chatbot dataset file.
//!
//! Decoupled from the server: failures are reported and never touch an
//! existing dataset.

pub mod config;
pub mod errors;
pub mod fetcher;
pub mod normalize;

pub use config::FetchConfig;
pub use errors::FetchError;
pub use fetcher::{FetchOutcome, fetch_dataset};

//! Lexical question answering over a small static Q/A corpus.
//!
//! Public API:
//! - [`corpus::load_corpus`]: JSON records → ordered [`corpus::QaPair`]s (never fails).
//! - [`index::LexicalIndex`]: TF-IDF (unigram + bigram) index with cosine best match.
//! - [`rules::RuleSet`]: ordered keyword rules checked before retrieval.
//! - [`knowledge_base::QaService`]: shared snapshot with atomic reload and `chat`.

pub mod config;
pub mod corpus;
pub mod errors;
pub mod index;
pub mod knowledge_base;
pub mod responder;
pub mod rules;
pub mod telemetry;
pub mod tokenizer;

pub use config::RetrieverConfig;
pub use corpus::{Corpus, QaPair};
pub use errors::RetrieverError;
pub use knowledge_base::{KnowledgeBase, QaService};
pub use responder::{Reply, ReplySource};

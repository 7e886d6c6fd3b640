//! Process-wide knowledge state.
//!
//! [`KnowledgeBase`] is an immutable snapshot of the corpus and the index
//! built from it. [`QaService`] holds the current snapshot behind a single
//! `Arc` swap: readers clone the `Arc`, reload builds a complete new snapshot
//! and replaces the reference in one step.

use std::{path::Path, sync::Arc, time::Instant};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    config::RetrieverConfig,
    corpus::{Corpus, load_corpus},
    errors::Result,
    index::{LexicalIndex, Retrieval, retrieve},
    responder::{Reply, respond},
    rules::RuleSet,
    tokenizer::Analyzer,
};

/// Corpus plus its derived index. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    corpus: Corpus,
    index: Option<LexicalIndex>,
}

impl KnowledgeBase {
    /// Index `corpus`; an empty corpus yields a snapshot without index.
    pub fn build(corpus: Corpus, analyzer: Analyzer) -> Self {
        let index = LexicalIndex::build(corpus.questions(), analyzer);
        Self { corpus, index }
    }

    /// Load the dataset at `path` and index it.
    pub fn load(path: &Path, analyzer: Analyzer) -> Self {
        let started = Instant::now();
        let kb = Self::build(load_corpus(path), analyzer);
        info!(
            target: "qa_retriever::knowledge_base",
            pairs = kb.pairs(),
            vocabulary = kb.index.as_ref().map_or(0, LexicalIndex::vocabulary_len),
            duration_ms = started.elapsed().as_millis(),
            "knowledge base ready"
        );
        kb
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> Option<&LexicalIndex> {
        self.index.as_ref()
    }

    /// Number of loaded pairs.
    pub fn pairs(&self) -> usize {
        self.corpus.len()
    }

    /// True when an index exists and has at least one term to match on.
    pub fn is_ready(&self) -> bool {
        self.index
            .as_ref()
            .is_some_and(|index| index.vocabulary_len() > 0)
    }

    pub fn retrieve(&self, text: &str, threshold: f32) -> Retrieval {
        retrieve(self.index.as_ref(), text, threshold)
    }

    pub fn answer(&self, idx: usize) -> Option<&str> {
        self.corpus.answer(idx)
    }
}

/// Shared chat service: configuration, rules and the current snapshot.
///
/// Cheap to share via `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct QaService {
    config: RetrieverConfig,
    rules: RuleSet,
    current: RwLock<Arc<KnowledgeBase>>,
}

impl QaService {
    /// Load rules and the initial snapshot from `config`.
    ///
    /// A broken dataset is not an error (the service starts without index);
    /// an unreadable rules file is.
    pub async fn start(config: RetrieverConfig) -> Result<Self> {
        let rules = RuleSet::load(config.rules_path.as_deref())?;
        let kb = load_blocking(&config).await?;
        Ok(Self::with_snapshot(config, rules, kb))
    }

    /// Assemble a service from parts (no I/O).
    pub fn with_snapshot(config: RetrieverConfig, rules: RuleSet, kb: KnowledgeBase) -> Self {
        Self {
            config,
            rules,
            current: RwLock::new(Arc::new(kb)),
        }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The snapshot in effect right now.
    pub async fn snapshot(&self) -> Arc<KnowledgeBase> {
        Arc::clone(&*self.current.read().await)
    }

    /// Install `kb` as the current snapshot and return its pair count.
    pub async fn install(&self, kb: KnowledgeBase) -> usize {
        let pairs = kb.pairs();
        let next = Arc::new(kb);
        let previous = std::mem::replace(&mut *self.current.write().await, next);
        info!(
            target: "qa_retriever::knowledge_base",
            previous_pairs = previous.pairs(),
            pairs,
            "knowledge base swapped"
        );
        pairs
    }

    /// Rebuild from the configured data file and swap it in.
    pub async fn reload(&self) -> Result<usize> {
        let kb = load_blocking(&self.config).await?;
        if !kb.is_ready() {
            warn!(
                target: "qa_retriever::knowledge_base",
                path = %self.config.data_path.display(),
                "reload produced no index; dataset not loaded"
            );
        }
        Ok(self.install(kb).await)
    }

    /// Answer a chat message against the current snapshot.
    pub async fn chat(&self, message: &str) -> Reply {
        let kb = self.snapshot().await;
        respond(&kb, &self.rules, self.config.threshold, message)
    }
}

/// File I/O and indexing run on the blocking pool.
async fn load_blocking(config: &RetrieverConfig) -> Result<KnowledgeBase> {
    let path = config.data_path.clone();
    let analyzer = config.analyzer();
    let kb = tokio::task::spawn_blocking(move || KnowledgeBase::load(&path, analyzer)).await?;
    Ok(kb)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::corpus::QaPair;
    use crate::responder::ReplySource;

    fn write(path: &Path, content: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    fn config_for(path: &Path) -> RetrieverConfig {
        RetrieverConfig {
            data_path: path.to_path_buf(),
            ..RetrieverConfig::default()
        }
    }

    #[test]
    fn rows_answers_and_pairs_stay_aligned() {
        let corpus = Corpus::new(vec![
            QaPair::new("opening hours", "9 to 5"),
            QaPair::new("parking available", "Yes, behind the store"),
            QaPair::new("??", "blank question still counts"),
        ]);
        let kb = KnowledgeBase::build(corpus, Analyzer::default());
        let index = kb.index().unwrap();
        assert_eq!(kb.pairs(), 3);
        assert_eq!(index.len(), kb.pairs());
        assert_eq!(kb.corpus().pairs().len(), index.len());
    }

    #[test]
    fn empty_snapshot_is_not_ready() {
        let kb = KnowledgeBase::build(Corpus::default(), Analyzer::default());
        assert!(!kb.is_ready());
        assert_eq!(kb.pairs(), 0);
    }

    #[test]
    fn token_less_questions_are_not_ready() {
        let corpus = Corpus::new(vec![QaPair::new("??", "a"), QaPair::new("!", "b")]);
        let kb = KnowledgeBase::build(corpus, Analyzer::default());
        assert_eq!(kb.index().map(LexicalIndex::len), Some(2));
        assert_eq!(kb.pairs(), 2);
        assert!(!kb.is_ready());
    }

    #[tokio::test]
    async fn start_with_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let svc = QaService::start(config_for(&dir.path().join("missing.json")))
            .await
            .unwrap();
        let kb = svc.snapshot().await;
        assert!(!kb.is_ready());
        assert_eq!(svc.chat("return policy").await.source, ReplySource::DatasetUnavailable);
    }

    #[tokio::test]
    async fn start_fails_on_unreadable_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RetrieverConfig {
            rules_path: Some(dir.path().join("rules.json")),
            ..config_for(&dir.path().join("data.json"))
        };
        assert!(QaService::start(cfg).await.is_err());
    }

    #[tokio::test]
    async fn reload_picks_up_new_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write(&path, r#"[{"question": "opening hours", "answer": "9 to 5"}]"#);

        let svc = QaService::start(config_for(&path)).await.unwrap();
        assert_eq!(svc.snapshot().await.pairs(), 1);

        write(
            &path,
            r#"[{"question": "opening hours", "answer": "10 to 6"},
                {"question": "parking", "answer": "behind the store"}]"#,
        );
        assert_eq!(svc.reload().await.unwrap(), 2);
        let reply = svc.chat("opening hours").await;
        assert_eq!(reply.text, "10 to 6");

        write(&path, "not json");
        assert_eq!(svc.reload().await.unwrap(), 0);
        assert!(!svc.snapshot().await.is_ready());
    }

    #[tokio::test]
    async fn old_snapshot_survives_swap() {
        let corpus = Corpus::new(vec![QaPair::new("opening hours", "9 to 5")]);
        let svc = QaService::with_snapshot(
            RetrieverConfig::default(),
            RuleSet::default(),
            KnowledgeBase::build(corpus, Analyzer::default()),
        );

        let held = svc.snapshot().await;
        svc.install(KnowledgeBase::default()).await;

        assert_eq!(held.pairs(), 1);
        assert_eq!(held.index().map(LexicalIndex::len), Some(1));
        assert_eq!(svc.snapshot().await.pairs(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_readers_never_see_a_mixed_snapshot() {
        let full = Corpus::new(
            (0..50)
                .map(|i| QaPair::new(format!("question number {i}"), format!("answer {i}")))
                .collect(),
        );
        let svc = Arc::new(QaService::with_snapshot(
            RetrieverConfig::default(),
            RuleSet::default(),
            KnowledgeBase::build(full.clone(), Analyzer::default()),
        ));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move {
                    let mut seen = Vec::new();
                    for _ in 0..500 {
                        let kb = svc.snapshot().await;
                        let rows = kb.index().map_or(0, LexicalIndex::len);
                        assert_eq!(rows, kb.pairs());
                        assert_eq!(kb.is_ready(), kb.pairs() > 0);
                        seen.push(kb.pairs());
                        tokio::task::yield_now().await;
                    }
                    seen
                })
            })
            .collect();

        for round in 0..20 {
            let next = if round % 2 == 0 {
                KnowledgeBase::default()
            } else {
                KnowledgeBase::build(full.clone(), Analyzer::default())
            };
            svc.install(next).await;
            tokio::task::yield_now().await;
        }

        for r in readers {
            let seen = r.await.unwrap();
            assert!(seen.iter().all(|&p| p == 0 || p == 50));
        }
    }
}

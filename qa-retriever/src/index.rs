//! TF-IDF lexical index over corpus questions.
//!
//! - Terms: unigrams + bigrams from [`Analyzer`].
//! - Weights: raw term count × smoothed idf, `ln((1 + n) / (1 + df)) + 1`.
//! - Rows and query vectors are L2-normalised, so the dot product (linear
//!   kernel) is the cosine similarity.
//!
//! The index is immutable after [`LexicalIndex::build`]; a reload builds a new
//! one.

use std::collections::HashMap;

use tracing::debug;

use crate::tokenizer::Analyzer;

/// Sparse vector as `(term id, weight)` sorted by term id.
type SparseVector = Vec<(usize, f32)>;

/// Why a query produced no answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoMatchReason {
    /// No index exists (empty or unreadable dataset).
    DatasetUnavailable,
    /// The best candidate scored below the threshold.
    BelowThreshold { best: f32 },
}

/// Outcome of a retrieval query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Retrieval {
    Matched { index: usize, score: f32 },
    NoMatch(NoMatchReason),
}

#[derive(Debug, Clone)]
pub struct LexicalIndex {
    analyzer: Analyzer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
    /// Unfiltered twin, consulted only when stop-word removal makes rows tie.
    tiebreak: Option<Box<LexicalIndex>>,
}

impl LexicalIndex {
    /// Build an index with one row per question, in input order.
    ///
    /// Returns `None` for an empty question list.
    pub fn build<'a, I>(questions: I, analyzer: Analyzer) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let questions: Vec<&str> = questions.into_iter().collect();
        let mut index = Self::build_rows(&questions, analyzer)?;
        if analyzer.filters_stop_words() {
            index.tiebreak = Self::build_rows(&questions, Analyzer::new(false)).map(Box::new);
        }

        debug!(
            target: "qa_retriever::index",
            rows = index.rows.len(),
            vocabulary = index.vocabulary.len(),
            "lexical index built"
        );
        Some(index)
    }

    fn build_rows(questions: &[&str], analyzer: Analyzer) -> Option<Self> {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        let mut counted: Vec<HashMap<usize, usize>> = Vec::new();

        for question in questions {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for term in analyzer.terms(question) {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term).or_insert(next_id);
                if id == doc_freq.len() {
                    doc_freq.push(0);
                }
                *counts.entry(id).or_insert(0) += 1;
            }
            for id in counts.keys() {
                doc_freq[*id] += 1;
            }
            counted.push(counts);
        }

        if counted.is_empty() {
            return None;
        }

        let n = counted.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let rows = counted
            .into_iter()
            .map(|counts| weigh(counts, &idf))
            .collect::<Vec<_>>();

        Some(Self {
            analyzer,
            vocabulary,
            idf,
            rows,
            tiebreak: None,
        })
    }

    /// Number of indexed questions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Project `text` into the index space; out-of-vocabulary terms are dropped.
    fn vectorize(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for term in self.analyzer.terms(text) {
            if let Some(&id) = self.vocabulary.get(&term) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        weigh(counts, &self.idf)
    }

    /// Cosine similarity of `text` against every row, in row order.
    pub fn similarities(&self, text: &str) -> Vec<f32> {
        let query = self.vectorize(text);
        self.rows.iter().map(|row| dot(&query, row)).collect()
    }

    /// Best row and its score.
    ///
    /// Rows tied on the top score are ranked again on unfiltered terms, so
    /// questions differing only in stop words ("when"/"where") stay apart.
    /// Remaining ties resolve to the lowest row.
    pub fn best_match(&self, text: &str) -> Option<(usize, f32)> {
        let scores = self.similarities(text);
        let (first, top) = first_max(&scores)?;

        let Some(tiebreak) = self.tiebreak.as_deref() else {
            return Some((first, top));
        };
        let tied: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == top)
            .map(|(i, _)| i)
            .collect();
        if tied.len() < 2 {
            return Some((first, top));
        }

        let full = tiebreak.similarities(text);
        let winner = tied
            .into_iter()
            .fold(first, |best, i| if full[i] > full[best] { i } else { best });
        Some((winner, top))
    }

    /// Best match gated by `threshold` (inclusive).
    pub fn query(&self, text: &str, threshold: f32) -> Retrieval {
        match self.best_match(text) {
            Some((index, score)) if score >= threshold => Retrieval::Matched { index, score },
            Some((_, best)) => Retrieval::NoMatch(NoMatchReason::BelowThreshold { best }),
            None => Retrieval::NoMatch(NoMatchReason::DatasetUnavailable),
        }
    }
}

/// Query an optional index; a missing index is reported as unavailable.
pub fn retrieve(index: Option<&LexicalIndex>, text: &str, threshold: f32) -> Retrieval {
    match index {
        Some(index) => index.query(text, threshold),
        None => Retrieval::NoMatch(NoMatchReason::DatasetUnavailable),
    }
}

/// Highest score and the first row holding it.
fn first_max(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if score <= b => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

fn weigh(counts: HashMap<usize, usize>, idf: &[f32]) -> SparseVector {
    let mut v: SparseVector = counts
        .into_iter()
        .map(|(id, tf)| (id, tf as f32 * idf[id]))
        .collect();
    v.sort_unstable_by_key(|(id, _)| *id);

    let norm = v.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in v.iter_mut() {
            *w /= norm;
        }
    }
    v
}

/// Dot product of two id-sorted sparse vectors.
fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

//! Corpus loading: JSON records → ordered, validated question/answer pairs.
//!
//! Input records are heterogeneous; each logical field is resolved through an
//! ordered alias table (first present wins). Extend [`QUESTION_FIELDS`] /
//! [`ANSWER_FIELDS`] to accept new schemas.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::{Result, RetrieverError};

/// Field names accepted for the question, in lookup order.
pub const QUESTION_FIELDS: &[&str] = &["question", "q", "input", "pattern"];

/// Field names accepted for the answer, in lookup order.
pub const ANSWER_FIELDS: &[&str] = &["answer", "a", "response", "reply"];

/// One stored question/answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered set of loaded pairs. Position `i` is the answer index returned by
/// the retriever for indexed question `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pairs: Vec<QaPair>,
}

impl Corpus {
    pub fn new(pairs: Vec<QaPair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.question.as_str())
    }

    pub fn answer(&self, idx: usize) -> Option<&str> {
        self.pairs.get(idx).map(|p| p.answer.as_str())
    }
}

/// Resolve the first alias holding a non-blank string; returns it trimmed.
fn first_present<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| obj.get(*f).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Extract a pair from a single record, or `None` if it is not an object or
/// either half is missing.
pub fn extract_pair(record: &Value) -> Option<QaPair> {
    let obj = record.as_object()?;
    let question = first_present(obj, QUESTION_FIELDS)?;
    let answer = first_present(obj, ANSWER_FIELDS)?;
    Some(QaPair::new(question, answer))
}

/// Extract all valid pairs from a list of records, preserving order.
pub fn extract_pairs(records: &[Value]) -> Vec<QaPair> {
    records.iter().filter_map(extract_pair).collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read the dataset file and return its top-level array.
pub fn read_records(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&raw)? {
        Value::Array(items) => Ok(items),
        other => Err(RetrieverError::NotAnArray(kind_of(&other))),
    }
}

/// Load the corpus from `path`.
///
/// Never fails: a missing/unreadable file, invalid JSON, a non-array document
/// or a dataset without valid pairs all yield an empty corpus and a warning.
pub fn load_corpus(path: &Path) -> Corpus {
    debug!(
        target: "qa_retriever::corpus",
        path = %path.display(),
        "load_corpus: start"
    );

    if !path.exists() {
        warn!(
            target: "qa_retriever::corpus",
            path = %path.display(),
            "data file not found"
        );
        return Corpus::default();
    }

    let records = match read_records(path) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                target: "qa_retriever::corpus",
                path = %path.display(),
                error = %err,
                "failed to read dataset"
            );
            return Corpus::default();
        }
    };

    let pairs = extract_pairs(&records);
    if pairs.is_empty() {
        warn!(
            target: "qa_retriever::corpus",
            path = %path.display(),
            records = records.len(),
            "no valid QA pairs found in data file"
        );
        return Corpus::default();
    }

    info!(
        target: "qa_retriever::corpus",
        path = %path.display(),
        pairs = pairs.len(),
        skipped = records.len() - pairs.len(),
        "loaded QA pairs"
    );
    Corpus::new(pairs)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn file_with(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn resolves_aliases_in_order() {
        let rec = json!({"q": "short", "input": "other", "reply": "r", "response": "first"});
        let pair = extract_pair(&rec).unwrap();
        assert_eq!(pair, QaPair::new("short", "first"));
    }

    #[test]
    fn trims_and_treats_blank_as_absent() {
        let rec = json!({"question": "   ", "pattern": "  where are you  ", "a": "\there\n"});
        let pair = extract_pair(&rec).unwrap();
        assert_eq!(pair, QaPair::new("where are you", "here"));

        assert!(extract_pair(&json!({"question": " ", "answer": "x"})).is_none());
        assert!(extract_pair(&json!({"question": "x", "answer": ""})).is_none());
    }

    #[test]
    fn skips_non_objects_and_non_strings() {
        let records = vec![
            json!("plain string"),
            json!(["q", "a"]),
            json!({"question": 42, "answer": "x"}),
            json!({"question": "ok", "answer": "fine"}),
            json!({"question": "only question"}),
        ];
        assert_eq!(extract_pairs(&records), vec![QaPair::new("ok", "fine")]);
    }

    #[test]
    fn loads_valid_file_in_order() {
        let f = file_with(
            r#"[
                {"question": "first", "answer": "1"},
                {"bogus": true},
                {"input": "second", "reply": "2"}
            ]"#,
        );
        let corpus = load_corpus(f.path());
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.questions().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(corpus.answer(1), Some("2"));
        assert_eq!(corpus.answer(2), None);
    }

    #[test]
    fn missing_file_gives_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_corpus(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn invalid_json_gives_empty_corpus() {
        let f = file_with("[{\"question\": ");
        assert!(load_corpus(f.path()).is_empty());
    }

    #[test]
    fn non_array_gives_empty_corpus() {
        let f = file_with(r#"{"question": "q", "answer": "a"}"#);
        assert!(load_corpus(f.path()).is_empty());
        assert!(matches!(
            read_records(f.path()),
            Err(RetrieverError::NotAnArray("object"))
        ));
    }

    #[test]
    fn no_valid_pairs_gives_empty_corpus() {
        let f = file_with(r#"[{"question": "q"}, 3, null]"#);
        assert!(load_corpus(f.path()).is_empty());
    }
}

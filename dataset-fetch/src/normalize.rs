//! Shape published datasets into the `[{question, answer}]` records the
//! server loads.

use qa_retriever::corpus::{QaPair, extract_pairs};
use serde_json::Value;

/// Object keys that may wrap the record list, in lookup order.
pub const CONTAINER_KEYS: &[&str] = &["conversations", "intents", "data", "pairs"];

/// Return the record list: the document itself if it is an array, else the
/// first container key holding an array.
pub fn unwrap_records(doc: Value) -> Option<Vec<Value>> {
    match doc {
        Value::Array(items) => Some(items),
        Value::Object(mut obj) => CONTAINER_KEYS.iter().find_map(|k| match obj.remove(*k) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }),
        _ => None,
    }
}

/// Parse a downloaded document into pairs using the server's alias rules.
pub fn normalize(doc: Value) -> Vec<QaPair> {
    unwrap_records(doc)
        .map(|records| extract_pairs(&records))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_array_is_used_directly() {
        let pairs = normalize(json!([{"q": "a?", "a": "b"}]));
        assert_eq!(pairs, vec![QaPair::new("a?", "b")]);
    }

    #[test]
    fn first_array_container_wins() {
        let doc = json!({
            "conversations": "not a list",
            "intents": [{"pattern": "hours", "response": "9-5"}],
            "data": [{"question": "ignored", "answer": "x"}]
        });
        assert_eq!(normalize(doc), vec![QaPair::new("hours", "9-5")]);
    }

    #[test]
    fn unknown_shapes_yield_nothing() {
        assert!(normalize(json!({"items": []})).is_empty());
        assert!(normalize(json!("text")).is_empty());
    }
}

use qa_retriever::Reply;
use serde::Serialize;

/// Response payload for /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Similarity of the matched question; only set for dataset answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl From<Reply> for ChatResponse {
    fn from(r: Reply) -> Self {
        Self {
            reply: r.text,
            score: r.score,
        }
    }
}

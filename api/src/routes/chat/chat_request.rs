use serde::Deserialize;

/// Request payload for /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message. Absent and blank are both rejected by the handler.
    #[serde(default)]
    pub message: Option<String>,
}

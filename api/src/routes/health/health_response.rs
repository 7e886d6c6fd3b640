use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// An index exists and retrieval can answer.
    pub ok: bool,
    /// Number of loaded QA pairs.
    pub pairs: usize,
}

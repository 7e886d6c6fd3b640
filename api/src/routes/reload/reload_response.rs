use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub pairs: usize,
}

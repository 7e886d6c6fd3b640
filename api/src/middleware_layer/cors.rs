use tower_http::cors::{Any, CorsLayer};

/// Public demo posture: every origin, method and header is allowed.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

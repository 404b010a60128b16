//! Cross-origin policy.
//!
//! The relay exists to be called from browser pages served elsewhere, so
//! every origin is allowed. Preflight `OPTIONS` requests are answered here
//! with 200 and an empty body and never reach a handler.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Methods advertised to preflight requests.
pub const ALLOWED_METHODS: [Method; 3] = [Method::POST, Method::GET, Method::OPTIONS];

/// Build the permissive CORS layer shared by all routes.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

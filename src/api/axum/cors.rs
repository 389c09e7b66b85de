//! CORS layers for browser callers.
//!
//! The session rides in cookies, so cross-origin callers need credentials
//! enabled and an explicit origin list.

use axum::http::{Method, header};
use tower_http::cors::CorsLayer;

/// Development only: any origin, no credentials.
pub fn permissive() -> CorsLayer {
    CorsLayer::permissive()
}

/// Credentialed CORS for the auth endpoints.
///
/// Origins that fail to parse as header values are skipped.
pub fn credentialed(allowed_origins: &[&str]) -> CorsLayer {
    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

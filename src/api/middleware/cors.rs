//! Cross-origin resource sharing policy.

use std::time::Duration;

use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};

const CSRF_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

/// Creates the CORS layer for all routes.
///
/// # Policy
///
/// - **Origins**: any
/// - **Methods**: `GET`, `POST`, `PUT`, `DELETE`, `OPTIONS`
/// - **Headers**: `Accept`, `Authorization`, `Content-Type`, `X-CSRF-Token`
/// - **Max age**: 300 seconds
///
/// Credentials are not allowed: browsers reject them together with a
/// wildcard origin.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            CSRF_TOKEN_HEADER,
        ])
        .max_age(Duration::from_secs(300))
}

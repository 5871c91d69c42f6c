//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`                                - Short link resolution (public)
//! - `GET  /health`                                - Health check
//! - `GET  /.well-known/apple-app-site-association` - iOS association file
//! - `GET  /.well-known/assetlinks.json`            - Android association file
//! - `GET  /favicon.ico`                           - Always 204
//! - `/static/*`                                   - Static assets
//! - anything else                                 - 308 to the fallback host, if enabled
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, common methods and headers
//! - **Path normalization** - Trailing slash handling

use std::path::PathBuf;

use crate::api::handlers::{
    fallback_redirect_handler, favicon_handler, health_handler, redirect_handler, well_known,
};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

/// Constructs the router without path normalization.
///
/// Used directly by integration tests.
pub fn build_router(state: AppState) -> Router {
    let static_dir = PathBuf::from(&state.config.static_dir);

    let mut router = Router::new()
        .route(
            "/.well-known/apple-app-site-association",
            well_known::apple_app_site_association(&static_dir),
        )
        .route(
            "/.well-known/assetlinks.json",
            well_known::asset_links(&static_dir),
        )
        .route("/favicon.ico", get(favicon_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest_service("/static", ServeDir::new(&static_dir));

    if state.config.is_fallback_enabled() {
        router = router.fallback(fallback_redirect_handler);
    }

    router
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

//! Handlers for app association files and the favicon.
//!
//! The association files are served verbatim from the static directory so
//! they can be replaced per deployment without a rebuild.

use std::path::Path;

use axum::{
    http::{HeaderValue, StatusCode, header},
    routing::{MethodRouter, get_service},
};
use tower_http::{services::ServeFile, set_header::SetResponseHeaderLayer};

use crate::state::AppState;

pub const APPLE_APP_SITE_ASSOCIATION_FILE: &str = "apple-app-site-association.json";
pub const ASSET_LINKS_FILE: &str = "assetlinks.json";

/// Serves the iOS universal links association file.
///
/// # Endpoint
///
/// `GET|HEAD /.well-known/apple-app-site-association`
///
/// Always answered as `application/json` with `Expires: 0` so Apple's CDN
/// refetches it.
pub fn apple_app_site_association(static_dir: &Path) -> MethodRouter<AppState> {
    json_file(static_dir, APPLE_APP_SITE_ASSOCIATION_FILE)
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
}

/// Serves the Android app links association file.
///
/// # Endpoint
///
/// `GET|HEAD /.well-known/assetlinks.json`
pub fn asset_links(static_dir: &Path) -> MethodRouter<AppState> {
    json_file(static_dir, ASSET_LINKS_FILE)
}

fn json_file(static_dir: &Path, name: &str) -> MethodRouter<AppState> {
    get_service(ServeFile::new(static_dir.join(name))).layer(SetResponseHeaderLayer::overriding(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    ))
}

/// `GET /favicon.ico` - there is no icon to serve.
pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

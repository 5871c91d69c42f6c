//! Permanent redirect of unmatched routes to the fallback domain.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::handlers::redirect::location_response;
use crate::state::AppState;

/// Redirects any unmatched route to the same path on `FALLBACK_HOST`.
///
/// Only installed when `ENABLE_FALLBACK=true` and `FALLBACK_HOST` is set.
///
/// # Responses
///
/// - **204 No Content**: `OPTIONS`
/// - **404 Not Found**: any other method except `GET`
/// - **308 Permanent Redirect**: `GET`, to `https://{FALLBACK_HOST}{path}?{query}`
pub async fn fallback_redirect_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    if method != Method::GET {
        return StatusCode::NOT_FOUND.into_response();
    }

    let target = fallback_target(&state.config.fallback_host, &uri);

    debug!(
        method = %method,
        path = uri.path(),
        query = uri.query().unwrap_or_default(),
        target,
        "Fallback redirect"
    );

    location_response(&target, StatusCode::PERMANENT_REDIRECT).into_response()
}

/// Builds the fallback URL, keeping the escaped path and raw query.
pub fn fallback_target(fallback_host: &str, uri: &Uri) -> String {
    let mut target = format!("https://{}{}", fallback_host, uri.path());
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}

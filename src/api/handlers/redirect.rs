//! Handler for short link resolution.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};
use url::Url;

use crate::config::Config;
use crate::domain::decision::{PreviewPage, RedirectOutcome, RedirectStatus};
use crate::domain::request::RequestContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_url::full_request_url;

/// Social preview page.
///
/// Renders `templates/preview.html` with Open Graph and Twitter card tags for
/// crawlers and a button that continues to the dynamic link.
#[derive(Template, WebTemplate)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub dynamic_link: String,
    pub app_icon_image_url: String,
    pub app_name: String,
    pub social_title: String,
    pub social_description: String,
    pub social_image_link: String,
}

impl PreviewTemplate {
    pub fn new(page: PreviewPage, config: &Config) -> Self {
        Self {
            dynamic_link: page.dynamic_link,
            app_icon_image_url: config.app_icon_image_url.clone(),
            app_name: config.app_name.clone(),
            social_title: page.social_title,
            social_description: page.social_description,
            social_image_link: page.social_image_link,
        }
    }
}

/// Resolves a short code and answers with the device-appropriate response.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Rebuild the full request URL from `Host`, `X-Forwarded-Proto` and the URI
/// 2. Resolve the long link through the exchange service (production host)
/// 3. Let the decision engine pick the outcome
/// 4. Map the outcome onto an HTTP response
///
/// # Responses
///
/// - **200 OK**: preview page (HTML), or an empty body when a mobile link has
///   no usable target
/// - **302 Found**: fallback/deep link, or the bounce through the preview host
/// - **307 Temporary Redirect**: App Store or Play Store listing
/// - **400 Bad Request**: missing or invalid `Host` header
/// - **404 Not Found**: unknown short link or no web target
/// - **500 Internal Server Error**: invalid redirect parameter or preview style
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    let url = full_request_url(&headers, &uri)?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    debug!(code, url = %url, user_agent, "Incoming dynamic link request");

    let request = RequestContext::new(url, user_agent);
    let outcome = state.redirect_service.resolve(&request).await;

    outcome_response(outcome, &state.config)
}

/// Maps a decision outcome onto an HTTP response.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for [`RedirectOutcome::NotFound`] and
/// [`AppError::Internal`] for [`RedirectOutcome::ServerError`] or a redirect
/// target that cannot be sent as a `Location` header.
pub fn outcome_response(outcome: RedirectOutcome, config: &Config) -> Result<Response, AppError> {
    match outcome {
        RedirectOutcome::RenderPreviewPage(page) => {
            Ok(PreviewTemplate::new(page, config).into_response())
        }
        RedirectOutcome::RedirectTo { url, status } => {
            let status = match status {
                RedirectStatus::Found => StatusCode::FOUND,
                RedirectStatus::TemporaryRedirect => StatusCode::TEMPORARY_REDIRECT,
            };
            location_response(&url, status)
        }
        RedirectOutcome::NotFound => Err(AppError::not_found("Short link not found", json!({}))),
        RedirectOutcome::ServerError(reason) => {
            error!(reason, "Failed to handle dynamic link");
            Err(AppError::internal(reason, json!({})))
        }
        RedirectOutcome::NoAction => Ok(StatusCode::OK.into_response()),
    }
}

/// Builds a redirect response with the given status and `Location`.
///
/// Targets containing spaces or non-ASCII characters are sent in their
/// percent-encoded URL form.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if `location` cannot be encoded as a header.
pub fn location_response(location: &str, status: StatusCode) -> Result<Response, AppError> {
    let value = Some(location)
        .filter(|l| l.bytes().all(|b| b.is_ascii_graphic()))
        .and_then(|l| HeaderValue::try_from(l).ok())
        .or_else(|| {
            Url::parse(location)
                .ok()
                .and_then(|url| HeaderValue::try_from(url.as_str()).ok())
        })
        .ok_or_else(|| {
            error!(location, "Redirect target is not a valid Location header");
            AppError::internal(
                "Invalid redirect target",
                json!({ "location": location }),
            )
        })?;

    Ok((status, [(header::LOCATION, value)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PreviewPage {
        PreviewPage {
            dynamic_link: "https://app.example.com/abc?from-preview=true".to_string(),
            social_title: "Title & more".to_string(),
            social_description: "Desc".to_string(),
            social_image_link: "http://img".to_string(),
        }
    }

    #[test]
    fn test_location_response_found() {
        let response = location_response("https://x.com", StatusCode::FOUND).unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://x.com");
    }

    #[test]
    fn test_location_response_encodes_unsafe_characters() {
        let response =
            location_response("https://x.com/a b/café", StatusCode::FOUND).unwrap();

        assert_eq!(
            response.headers()[header::LOCATION],
            "https://x.com/a%20b/caf%C3%A9"
        );
    }

    #[test]
    fn test_outcome_response_store_redirect() {
        let response = outcome_response(
            RedirectOutcome::RedirectTo {
                url: "https://apps.apple.com/app/id1".to_string(),
                status: RedirectStatus::TemporaryRedirect,
            },
            &Config::default(),
        )
        .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[test]
    fn test_outcome_response_errors() {
        let not_found = outcome_response(RedirectOutcome::NotFound, &Config::default());
        assert!(matches!(not_found, Err(AppError::NotFound { .. })));

        let server_error = outcome_response(
            RedirectOutcome::ServerError("Invalid 'ofl' link format".to_string()),
            &Config::default(),
        );
        assert!(matches!(server_error, Err(AppError::Internal { .. })));
    }

    #[test]
    fn test_outcome_response_no_action() {
        let response = outcome_response(RedirectOutcome::NoAction, &Config::default()).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_preview_template_renders_branding_and_escapes() {
        let config = Config {
            app_name: "Links".to_string(),
            app_icon_image_url: "https://example.com/icon.png".to_string(),
            ..Config::default()
        };

        let html = PreviewTemplate::new(page(), &config).render().unwrap();

        assert!(html.contains("Links"));
        assert!(html.contains("https://example.com/icon.png"));
        assert!(html.contains("Title &amp; more"));
        assert!(html.contains("http://img"));
    }
}

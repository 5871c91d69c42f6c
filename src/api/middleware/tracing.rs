//! HTTP request/response tracing middleware.

use axum::http::{Request, header};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Request span carrying the `Host` header.
///
/// Preview and production hosts serve the same paths, so the URI alone does
/// not say which branch a request took.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSpan;

impl<B> MakeSpan<B> for HostSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        tracing::info_span!(
            "request",
            method = %request.method(),
            host,
            uri = %request.uri(),
        )
    }
}

/// Creates a tracing middleware for HTTP requests.
///
/// Responses are logged at `INFO` with latency in milliseconds.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET host=app.example.com uri=/abc}: finished processing request latency=3 ms status=302
/// INFO request{method=GET host=app-preview.example.com uri=/abc}: finished processing request latency=2 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, HostSpan> {
    TraceLayer::new_for_http().make_span_with(HostSpan).on_response(
        DefaultOnResponse::new()
            .level(Level::INFO)
            .latency_unit(LatencyUnit::Millis),
    )
}

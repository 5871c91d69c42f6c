//! Full request URL reconstruction from HTTP request parts.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};
use url::Url;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Rebuilds the absolute URL the client requested.
///
/// - **Scheme**: `X-Forwarded-Proto` when present, otherwise `http`
/// - **Host**: the `Host` header (port kept), falling back to the URI authority
/// - **Path and query**: taken from the request URI as received
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The `Host` header contains invalid UTF-8
/// - The pieces do not form a valid absolute URL
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "app.example.com".parse().unwrap());
/// let uri: Uri = "/abc?x=1".parse().unwrap();
///
/// let url = full_request_url(&headers, &uri).unwrap();
/// assert_eq!(url.as_str(), "http://app.example.com/abc?x=1");
/// ```
pub fn full_request_url(headers: &HeaderMap, uri: &Uri) -> Result<Url, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
            .to_string(),
        None => uri
            .authority()
            .map(|authority| authority.to_string())
            .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?,
    };

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|proto| !proto.is_empty())
        .unwrap_or("http");

    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Url::parse(&format!("{scheme}://{host}{path_and_query}")).map_err(|e| {
        AppError::bad_request(
            "Invalid request URL",
            serde_json::json!({ "reason": e.to_string() }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_full_request_url_plain_http() {
        let uri: Uri = "/test?param=value".parse().unwrap();

        let url = full_request_url(&headers("example.com"), &uri).unwrap();
        assert_eq!(url.as_str(), "http://example.com/test?param=value");
    }

    #[test]
    fn test_full_request_url_forwarded_proto() {
        let mut headers = headers("example.com");
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https"));
        let uri: Uri = "/forwarded".parse().unwrap();

        let url = full_request_url(&headers, &uri).unwrap();
        assert_eq!(url.as_str(), "https://example.com/forwarded");
    }

    #[test]
    fn test_full_request_url_keeps_port() {
        let uri: Uri = "/abc".parse().unwrap();

        let url = full_request_url(&headers("app.example.com:4040"), &uri).unwrap();
        assert_eq!(url.as_str(), "http://app.example.com:4040/abc");
        assert_eq!(url.host_str(), Some("app.example.com"));
    }

    #[test]
    fn test_full_request_url_uri_authority_fallback() {
        let uri: Uri = "http://app.example.com/abc".parse().unwrap();

        let url = full_request_url(&HeaderMap::new(), &uri).unwrap();
        assert_eq!(url.as_str(), "http://app.example.com/abc");
    }

    #[test]
    fn test_full_request_url_missing_host() {
        let uri: Uri = "/abc".parse().unwrap();

        let result = full_request_url(&HeaderMap::new(), &uri);
        assert!(result.is_err());
    }

    #[test]
    fn test_full_request_url_invalid_host() {
        let uri: Uri = "/abc".parse().unwrap();

        let result = full_request_url(&headers("bad host"), &uri);
        assert!(result.is_err());
    }
}

//! Per-request input to the redirect decision.

use url::{Url, form_urlencoded};

use crate::domain::device::DeviceClass;

/// Query flag set on URLs that already went through the preview host.
pub const FROM_PREVIEW_PARAM: &str = "from-preview";

/// The inbound request as seen by the decision engine.
///
/// Built once per HTTP request and never persisted.
#[derive(Debug, Clone)]
pub struct RequestContext {
    url: Url,
    user_agent: String,
}

impl RequestContext {
    /// Creates a context from the full request URL (scheme, host, path, query)
    /// and the raw `User-Agent` header value.
    pub fn new(url: Url, user_agent: impl Into<String>) -> Self {
        Self {
            url,
            user_agent: user_agent.into(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn device(&self) -> DeviceClass {
        DeviceClass::from_user_agent(&self.user_agent)
    }

    /// Returns `true` only when the first `from-preview` value is exactly `"true"`.
    pub fn from_preview(&self) -> bool {
        self.url
            .query_pairs()
            .find(|(key, _)| key == FROM_PREVIEW_PARAM)
            .is_some_and(|(_, value)| value == "true")
    }
}

/// Returns a copy of `url` whose query carries `from-preview=true` exactly once.
///
/// Other query segments are kept byte-for-byte and in order.
pub fn with_from_preview(url: &Url) -> Url {
    let flag = format!("{FROM_PREVIEW_PARAM}=true");

    let mut segments: Vec<&str> = url
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty() && !is_from_preview_segment(segment))
        .collect();
    segments.push(&flag);

    let mut marked = url.clone();
    marked.set_query(Some(&segments.join("&")));
    marked
}

fn is_from_preview_segment(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == FROM_PREVIEW_PARAM)
}

/// Returns a copy of `url` without query string or fragment.
pub fn without_query(url: &Url) -> Url {
    let mut cleaned = url.clone();
    cleaned.set_query(None);
    cleaned.set_fragment(None);
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(url: &str) -> RequestContext {
        RequestContext::new(Url::parse(url).unwrap(), "")
    }

    #[test]
    fn test_from_preview_flag() {
        assert!(context("http://a.b/x?from-preview=true").from_preview());
        assert!(!context("http://a.b/x?from-preview=false").from_preview());
        assert!(!context("http://a.b/x?from-preview=TRUE").from_preview());
        assert!(!context("http://a.b/x").from_preview());
        assert!(!context("http://a.b/x?from-preview=false&from-preview=true").from_preview());
    }

    #[test]
    fn test_host() {
        assert_eq!(context("http://app.example.com:4040/x").host(), "app.example.com");
    }

    #[test]
    fn test_with_from_preview_appends_flag() {
        let url = Url::parse("https://app.example.com/abc?utm=1").unwrap();
        assert_eq!(
            with_from_preview(&url).as_str(),
            "https://app.example.com/abc?utm=1&from-preview=true"
        );
    }

    #[test]
    fn test_with_from_preview_replaces_existing_flag() {
        let url = Url::parse("https://app.example.com/abc?from-preview=false&x=y").unwrap();
        assert_eq!(
            with_from_preview(&url).as_str(),
            "https://app.example.com/abc?x=y&from-preview=true"
        );
    }

    #[test]
    fn test_with_from_preview_keeps_raw_query() {
        let url = Url::parse("https://app.example.com/abc?utm=a%20b&flag&from-preview=false").unwrap();
        assert_eq!(
            with_from_preview(&url).as_str(),
            "https://app.example.com/abc?utm=a%20b&flag&from-preview=true"
        );
    }

    #[test]
    fn test_with_from_preview_without_query() {
        let url = Url::parse("https://app.example.com/abc").unwrap();
        assert_eq!(
            with_from_preview(&url).as_str(),
            "https://app.example.com/abc?from-preview=true"
        );
    }

    #[test]
    fn test_without_query() {
        let url = Url::parse("https://app.example.com/abc?x=y#frag").unwrap();
        assert_eq!(without_query(&url).as_str(), "https://app.example.com/abc");
    }
}

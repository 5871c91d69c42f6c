//! JSON-over-HTTP exchange client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::exchange::{ExchangeError, LinkExchange};
use crate::domain::resolved_link::ResolvedLink;

/// Request body sent to the exchange endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeShortLinkRequest<'a> {
    pub requested_link: &'a str,
}

/// Response body returned by the exchange endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongLinkResponse {
    #[serde(default)]
    pub long_link: Option<String>,
}

/// Exchange client that POSTs `{"requestedLink": ...}` to a configured endpoint.
///
/// One request per call, bounded by the client timeout, never retried.
#[derive(Debug, Clone)]
pub struct HttpLinkExchange {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLinkExchange {
    /// Creates a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Http`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ExchangeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LinkExchange for HttpLinkExchange {
    async fn resolve_long_link(
        &self,
        requested_link: &str,
    ) -> Result<Option<ResolvedLink>, ExchangeError> {
        debug!(url = requested_link, "Getting query params from url");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExchangeShortLinkRequest { requested_link })
            .send()
            .await?;

        debug!(status = %response.status(), "Exchange responded");

        let body = response.bytes().await?;
        let parsed: LongLinkResponse = serde_json::from_slice(&body)?;

        match parsed.long_link.filter(|link| !link.is_empty()) {
            None => Ok(None),
            Some(link) => ResolvedLink::from_long_link(&link)
                .map(Some)
                .map_err(|source| ExchangeError::InvalidLongLink { link, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ExchangeShortLinkRequest {
            requested_link: "https://app.example.com/abc",
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "requestedLink": "https://app.example.com/abc" })
        );
    }

    #[test]
    fn test_response_missing_long_link() {
        let parsed: LongLinkResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.long_link.is_none());
    }

    #[test]
    fn test_response_long_link() {
        let parsed: LongLinkResponse =
            serde_json::from_str(r#"{"longLink":"https://example.com/?link=x","extra":1}"#)
                .unwrap();
        assert_eq!(parsed.long_link.as_deref(), Some("https://example.com/?link=x"));
    }

    #[test]
    fn test_new_keeps_endpoint() {
        let exchange =
            HttpLinkExchange::new("http://localhost:9010/v1/exchangeShortLink", Duration::from_secs(1))
                .unwrap();
        assert_eq!(exchange.endpoint(), "http://localhost:9010/v1/exchangeShortLink");
    }
}

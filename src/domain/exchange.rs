//! Contract for the external service that expands short links.

use async_trait::async_trait;

use crate::domain::resolved_link::ResolvedLink;

/// Errors from the exchange service that are distinct from "not found".
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("exchange request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode exchange response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("exchange returned an invalid long link {link:?}: {source}")]
    InvalidLongLink {
        link: String,
        #[source]
        source: url::ParseError,
    },
}

/// Expands a requested short link into its long link's query parameters.
///
/// # Implementations
///
/// - [`crate::infrastructure::exchange::HttpLinkExchange`] - JSON over HTTP
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkExchange: Send + Sync {
    /// Resolves `requested_link` (an absolute URL on the production host).
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` when the service knows the short link
    /// - `Ok(None)` when the service answered without a long link
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError`] on transport failure, malformed JSON, or a
    /// long link that is not an absolute URL.
    async fn resolve_long_link(
        &self,
        requested_link: &str,
    ) -> Result<Option<ResolvedLink>, ExchangeError>;
}

//! Short link resolution service.

use std::sync::Arc;

use tracing::{debug, error};
use url::Url;

use crate::domain::decision::{RedirectEngine, RedirectOutcome};
use crate::domain::exchange::LinkExchange;
use crate::domain::preview_host::PreviewHostError;
use crate::domain::request::{RequestContext, without_query};

/// Resolves a short-link request to its final outcome.
///
/// Owns the only I/O in the redirect path: one call to the exchange service
/// per request. Everything after that is delegated to [`RedirectEngine`].
pub struct RedirectService {
    engine: RedirectEngine,
    exchange: Arc<dyn LinkExchange>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(engine: RedirectEngine, exchange: Arc<dyn LinkExchange>) -> Self {
        Self { engine, exchange }
    }

    pub fn engine(&self) -> &RedirectEngine {
        &self.engine
    }

    /// Runs the full resolution for one request.
    ///
    /// # Flow
    ///
    /// 1. Rewrite the request URL to its production host
    /// 2. Ask the exchange service for the long link at production host + path
    /// 3. Let the engine pick the outcome
    ///
    /// # Outcomes
    ///
    /// - [`RedirectOutcome::NotFound`] if the host cannot be rewritten, the
    ///   exchange has no long link, the long link has no parameters, or the
    ///   exchange call fails
    /// - [`RedirectOutcome::ServerError`] if the preview URL style is unrecognized
    pub async fn resolve(&self, request: &RequestContext) -> RedirectOutcome {
        let requested_link = match self.requested_link(request.url()) {
            Ok(url) => url,
            Err(PreviewHostError::Config(e)) => {
                error!(error = %e, "Failed to get non preview host");
                return RedirectOutcome::ServerError(e.to_string());
            }
            Err(e) => {
                debug!(error = %e, "Failed to get non preview host");
                return RedirectOutcome::NotFound;
            }
        };

        let link = match self.exchange.resolve_long_link(requested_link.as_str()).await {
            Ok(Some(link)) if !link.is_empty() => link,
            Ok(_) => {
                debug!(requested_link = %requested_link, "Exchange returned no long link");
                return RedirectOutcome::NotFound;
            }
            Err(e) => {
                error!(requested_link = %requested_link, error = %e, "Failed to exchange short link");
                return RedirectOutcome::NotFound;
            }
        };

        debug!(params = %link.encode(), "Dynamic link query params");

        let outcome = self.engine.decide(request, &link);
        debug!(outcome = outcome.kind(), "Resolved dynamic link");
        outcome
    }

    /// Production-host form of the request URL, without query or fragment.
    fn requested_link(&self, url: &Url) -> Result<Url, PreviewHostError> {
        let production = self.engine.resolver().to_production_url(url)?;
        Ok(without_query(&production))
    }
}

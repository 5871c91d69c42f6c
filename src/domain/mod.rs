//! Domain layer: link resolution and redirect dispatch.
//!
//! Everything here is independent of HTTP. The API layer builds a
//! [`request::RequestContext`] and maps the resulting
//! [`decision::RedirectOutcome`] onto a response.
//!
//! # Architecture
//!
//! - [`preview_host`] - Preview/production host conversion and classification
//! - [`device`] - `User-Agent` classification
//! - [`resolved_link`] - Long-link query parameters
//! - [`request`] - Per-request context and URL helpers
//! - [`decision`] - The redirect decision engine
//! - [`exchange`] - Trait for the external short-link exchange service
//!
//! # Request Flow
//!
//! 1. The handler computes the production URL for the request
//! 2. [`exchange::LinkExchange`] expands it into a [`resolved_link::ResolvedLink`]
//! 3. [`decision::RedirectEngine`] picks the outcome

pub mod decision;
pub mod device;
pub mod exchange;
pub mod preview_host;
pub mod request;
pub mod resolved_link;

pub use decision::{PreviewPage, RedirectEngine, RedirectOutcome, RedirectStatus};
pub use device::DeviceClass;
pub use exchange::{ExchangeError, LinkExchange};
pub use preview_host::{ConfigError, PreviewHostResolver, PreviewUrlStyle};
pub use request::RequestContext;
pub use resolved_link::ResolvedLink;

#[cfg(test)]
pub use exchange::MockLinkExchange;

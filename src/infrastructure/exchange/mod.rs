//! Short-link exchange service clients.
//!
//! Provides [`HttpLinkExchange`], the JSON-over-HTTP implementation of
//! [`crate::domain::exchange::LinkExchange`].

mod http_exchange;

pub use http_exchange::{ExchangeShortLinkRequest, HttpLinkExchange, LongLinkResponse};

//! Utility functions for request handling and URL processing.
//!
//! - [`query_unescape`] - Strict query-component unescaping
//! - [`request_url`] - Full request URL reconstruction from headers

pub mod query_unescape;
pub mod request_url;

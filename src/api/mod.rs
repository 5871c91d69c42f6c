//! HTTP layer: request handling and response mapping.
//!
//! This layer translates HTTP requests into a
//! [`crate::domain::request::RequestContext`] and decision outcomes back into
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS and tracing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;

//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`exchange`] - HTTP client for the short-link exchange service

pub mod exchange;

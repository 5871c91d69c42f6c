//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations and external collaborators and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Short link resolution and redirect dispatch

pub mod services;

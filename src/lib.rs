//! # Dynamic Link Redirect
//!
//! Resolves short dynamic links into device-appropriate destinations: a
//! social preview page, an App Store or Play Store listing, a native app
//! deep link, or a plain web URL.
//!
//! Short links are neither stored nor generated here. Every request is
//! expanded through an external exchange service, and the long link's query
//! parameters drive the redirect decision.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Preview-host resolver, device classification, decision engine
//! - **Application Layer** ([`application`]) - Resolution service around the exchange call
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP exchange client
//! - **API Layer** ([`api`]) - Handlers, middleware and the preview page template
//!
//! ## Quick Start
//!
//! ```bash
//! export PREVIEW_URL_STYLE="hyphenated"
//! export EXCHANGE_SHORT_LINK_ENDPOINT="http://localhost:9010/v1/exchangeShortLink"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

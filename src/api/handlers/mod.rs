//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod redirect;
pub mod well_known;

pub use fallback::fallback_redirect_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use well_known::favicon_handler;

use std::sync::Arc;

use crate::application::services::RedirectService;
use crate::config::Config;

/// Shared, read-only state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(redirect_service: Arc<RedirectService>, config: Arc<Config>) -> Self {
        Self {
            redirect_service,
            config,
        }
    }
}

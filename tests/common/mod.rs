#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use dynamic_link_redirect::application::services::RedirectService;
use dynamic_link_redirect::config::Config;
use dynamic_link_redirect::domain::{
    ExchangeError, LinkExchange, PreviewHostResolver, RedirectEngine, ResolvedLink,
};
use dynamic_link_redirect::routes::build_router;
use dynamic_link_redirect::state::AppState;
use std::collections::HashMap;
use std::sync::Arc;

pub const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
pub const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
pub const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36";
pub const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// In-memory exchange keyed by requested link.
#[derive(Default)]
pub struct StubExchange {
    links: HashMap<String, String>,
}

impl StubExchange {
    pub fn with_link(mut self, requested_link: &str, long_link: &str) -> Self {
        self.links
            .insert(requested_link.to_string(), long_link.to_string());
        self
    }
}

#[async_trait]
impl LinkExchange for StubExchange {
    async fn resolve_long_link(
        &self,
        requested_link: &str,
    ) -> Result<Option<ResolvedLink>, ExchangeError> {
        match self.links.get(requested_link) {
            None => Ok(None),
            Some(link) => ResolvedLink::from_long_link(link)
                .map(Some)
                .map_err(|source| ExchangeError::InvalidLongLink {
                    link: link.clone(),
                    source,
                }),
        }
    }
}

pub fn test_config(preview_url_style: &str) -> Config {
    Config {
        preview_url_style: preview_url_style.to_string(),
        app_name: "Test App".to_string(),
        app_icon_image_url: "https://cdn.example.com/icon.png".to_string(),
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
        ..Config::default()
    }
}

pub fn create_test_state(config: Config, exchange: StubExchange) -> AppState {
    let engine = RedirectEngine::new(PreviewHostResolver::new(&config.preview_url_style));
    let redirect_service = RedirectService::new(engine, Arc::new(exchange));

    AppState::new(Arc::new(redirect_service), Arc::new(config))
}

pub fn make_server(config: Config, exchange: StubExchange) -> TestServer {
    let app = build_router(create_test_state(config, exchange));
    TestServer::new(app).unwrap()
}

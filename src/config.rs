//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then shared
//! read-only by every request.
//!
//! ```bash
//! export PREVIEW_URL_STYLE="hyphenated"
//! export EXCHANGE_SHORT_LINK_ENDPOINT="http://localhost:9010/v1/exchangeShortLink"
//! export APP_ICON_IMAGE_URL="https://example.com/icon.png"
//! export APP_NAME="My app name"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:4040`, or `0.0.0.0:$PORT` if `PORT` is set)
//! - `PREVIEW_URL_STYLE` - `hyphenated` or `subdomain` (default: `hyphenated`)
//! - `EXCHANGE_SHORT_LINK_ENDPOINT` - Exchange service URL
//! - `EXCHANGE_TIMEOUT_SECONDS` - Exchange request timeout (default: 10)
//! - `APP_ICON_IMAGE_URL` / `APP_NAME` - Branding for the preview page
//! - `ENABLE_FALLBACK` / `FALLBACK_HOST` - Permanent redirect of unmatched routes
//! - `STATIC_DIR` - Directory with well-known files and static assets (default: `static`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;

use crate::domain::preview_host::PreviewUrlStyle;

const DEFAULT_PORT: &str = "4040";
const DEFAULT_EXCHANGE_ENDPOINT: &str = "http://localhost:9010/v1/exchangeShortLink";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Raw `PREVIEW_URL_STYLE` value. Unrecognized values are kept so they
    /// surface as per-request errors rather than a startup failure.
    pub preview_url_style: String,
    pub exchange_endpoint: String,
    pub exchange_timeout_seconds: u64,
    pub app_icon_image_url: String,
    pub app_name: String,
    /// When true, unmatched routes are permanently redirected to `fallback_host`.
    pub enable_fallback: bool,
    pub fallback_host: String,
    pub static_dir: String,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            preview_url_style: "hyphenated".to_string(),
            exchange_endpoint: DEFAULT_EXCHANGE_ENDPOINT.to_string(),
            exchange_timeout_seconds: 10,
            app_icon_image_url: "https://example.com/icon.png".to_string(),
            app_name: "My app name".to_string(),
            enable_fallback: false,
            fallback_host: String::new(),
            static_dir: "static".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, using defaults for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `EXCHANGE_TIMEOUT_SECONDS` is set but not a number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| match env::var("PORT") {
            Ok(port) => format!("0.0.0.0:{port}"),
            Err(_) => defaults.listen_addr.clone(),
        });

        let exchange_timeout_seconds = match env::var("EXCHANGE_TIMEOUT_SECONDS") {
            Ok(v) => v.trim().parse().map_err(|_| {
                anyhow::anyhow!("EXCHANGE_TIMEOUT_SECONDS must be a number, got '{v}'")
            })?,
            Err(_) => defaults.exchange_timeout_seconds,
        };

        let enable_fallback = env::var("ENABLE_FALLBACK")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            preview_url_style: env::var("PREVIEW_URL_STYLE").unwrap_or(defaults.preview_url_style),
            exchange_endpoint: env::var("EXCHANGE_SHORT_LINK_ENDPOINT")
                .unwrap_or(defaults.exchange_endpoint),
            exchange_timeout_seconds,
            app_icon_image_url: env::var("APP_ICON_IMAGE_URL")
                .unwrap_or(defaults.app_icon_image_url),
            app_name: env::var("APP_NAME").unwrap_or(defaults.app_name),
            enable_fallback,
            fallback_host: env::var("FALLBACK_HOST")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Validates the configuration.
    ///
    /// An unrecognized `PREVIEW_URL_STYLE` is deliberately not rejected here;
    /// see [`Self::preview_style_error`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `exchange_endpoint` is not an http(s) URL
    /// - `exchange_timeout_seconds` is zero
    /// - fallback is enabled without a fallback host
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.exchange_endpoint.starts_with("http://")
            && !self.exchange_endpoint.starts_with("https://")
        {
            anyhow::bail!(
                "EXCHANGE_SHORT_LINK_ENDPOINT must start with 'http://' or 'https://', got '{}'",
                self.exchange_endpoint
            );
        }

        if self.exchange_timeout_seconds == 0 {
            anyhow::bail!("EXCHANGE_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.enable_fallback && self.fallback_host.is_empty() {
            anyhow::bail!("FALLBACK_HOST must be set when ENABLE_FALLBACK is true");
        }

        Ok(())
    }

    /// Returns the parse error for the configured preview style, if any.
    pub fn preview_style_error(&self) -> Option<String> {
        self.preview_url_style
            .parse::<PreviewUrlStyle>()
            .err()
            .map(|e| e.to_string())
    }

    /// Returns whether unmatched routes are redirected to the fallback host.
    pub fn is_fallback_enabled(&self) -> bool {
        self.enable_fallback && !self.fallback_host.is_empty()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Preview URL style: {}", self.preview_url_style);
        tracing::info!("  Exchange endpoint: {}", self.exchange_endpoint);
        tracing::info!("  Exchange timeout: {}s", self.exchange_timeout_seconds);
        tracing::info!("  App name: {}", self.app_name);

        if self.is_fallback_enabled() {
            tracing::info!("  Fallback host: {} (enabled)", self.fallback_host);
        } else {
            tracing::info!("  Fallback: disabled");
        }

        tracing::info!("  Static dir: {}", self.static_dir);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if let Some(err) = self.preview_style_error() {
            tracing::warn!("  {err}; every short link request will fail with 500");
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

//! Conversion between production hosts and their preview counterparts.
//!
//! Two naming conventions are supported, selected once through
//! `PREVIEW_URL_STYLE`:
//!
//! - **hyphenated**: `app-preview.example.com` ↔ `app.example.com`
//! - **subdomain**: `preview.example.com` ↔ `example.com`
//!
//! The resolver keeps the raw configured value. An unrecognized value does not
//! stop the service from starting; instead every operation reports
//! [`ConfigError`] so the failure surfaces per request.

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use url::Url;

const HYPHENATED_SUFFIX: &str = "-preview";
const SUBDOMAIN_LABEL: &str = "preview";

/// The preview URL style is not one of the supported conventions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid preview URL style: {0}")]
pub struct ConfigError(pub String);

/// Errors produced while deriving a preview host or URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewHostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid host format: {0}")]
    InvalidHost(String),
}

/// Naming convention used to derive preview hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewUrlStyle {
    Hyphenated,
    Subdomain,
}

impl FromStr for PreviewUrlStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hyphenated" => Ok(Self::Hyphenated),
            "subdomain" => Ok(Self::Subdomain),
            other => Err(ConfigError(other.to_string())),
        }
    }
}

impl fmt::Display for PreviewUrlStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hyphenated => f.write_str("hyphenated"),
            Self::Subdomain => f.write_str("subdomain"),
        }
    }
}

/// Classifies and rewrites hosts under the configured preview convention.
#[derive(Debug, Clone)]
pub struct PreviewHostResolver {
    style: Result<PreviewUrlStyle, ConfigError>,
}

impl PreviewHostResolver {
    /// Creates a resolver from the raw `PREVIEW_URL_STYLE` value.
    pub fn new(style: &str) -> Self {
        Self {
            style: style.parse(),
        }
    }

    /// Creates a resolver for a known-good convention.
    pub fn with_style(style: PreviewUrlStyle) -> Self {
        Self { style: Ok(style) }
    }

    /// Returns the active convention, or the configuration error it was built with.
    pub fn style(&self) -> Result<PreviewUrlStyle, ConfigError> {
        self.style.clone()
    }

    /// Returns `true` when `host` is the preview form of some production host.
    ///
    /// Hosts with fewer than two labels are never preview hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured style is unrecognized.
    pub fn is_preview_host(&self, host: &str) -> Result<bool, ConfigError> {
        let style = self.style()?;

        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 2 {
            debug!(host, "Host has insufficient parts");
            return Ok(false);
        }

        let first = labels[0];
        let is_preview = match style {
            PreviewUrlStyle::Hyphenated => first.ends_with(HYPHENATED_SUFFIX),
            PreviewUrlStyle::Subdomain => first == SUBDOMAIN_LABEL,
        };

        debug!(host, %style, is_preview, "Classified host");
        Ok(is_preview)
    }

    /// Strips the preview marker from `host` if present.
    ///
    /// Idempotent: production hosts and single-label hosts come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured style is unrecognized.
    pub fn to_production_host(&self, host: &str) -> Result<String, ConfigError> {
        let style = self.style()?;

        let Some((first, rest)) = host.split_once('.') else {
            return Ok(host.to_string());
        };

        let production = match style {
            PreviewUrlStyle::Hyphenated => match first.strip_suffix(HYPHENATED_SUFFIX) {
                Some(stripped) => format!("{stripped}.{rest}"),
                None => host.to_string(),
            },
            PreviewUrlStyle::Subdomain if first == SUBDOMAIN_LABEL => rest.to_string(),
            PreviewUrlStyle::Subdomain => host.to_string(),
        };

        Ok(production)
    }

    /// Adds the preview marker to `host`.
    ///
    /// # Errors
    ///
    /// - [`PreviewHostError::Config`] if the configured style is unrecognized
    /// - [`PreviewHostError::InvalidHost`] if `host` has fewer than two labels
    pub fn to_preview_host(&self, host: &str) -> Result<String, PreviewHostError> {
        let style = self.style()?;

        let Some((first, rest)) = host.split_once('.') else {
            return Err(PreviewHostError::InvalidHost(host.to_string()));
        };

        let preview = match style {
            PreviewUrlStyle::Hyphenated => format!("{first}{HYPHENATED_SUFFIX}.{rest}"),
            PreviewUrlStyle::Subdomain => format!("{SUBDOMAIN_LABEL}.{host}"),
        };

        Ok(preview)
    }

    /// Returns a copy of `url` with its host rewritten to the preview form.
    ///
    /// Scheme, port, path and query are preserved.
    ///
    /// # Errors
    ///
    /// See [`Self::to_preview_host`]. Also fails if the URL has no host or the
    /// rewritten host is rejected by the URL parser.
    pub fn to_preview_url(&self, url: &Url) -> Result<Url, PreviewHostError> {
        let host = url
            .host_str()
            .ok_or_else(|| PreviewHostError::InvalidHost(url.to_string()))?;
        let preview_host = self.to_preview_host(host)?;
        with_host(url, &preview_host)
    }

    /// Returns a copy of `url` with the preview marker stripped from its host.
    ///
    /// # Errors
    ///
    /// See [`Self::to_production_host`]. Also fails if the URL has no host.
    pub fn to_production_url(&self, url: &Url) -> Result<Url, PreviewHostError> {
        let host = url
            .host_str()
            .ok_or_else(|| PreviewHostError::InvalidHost(url.to_string()))?;
        let production_host = self.to_production_host(host)?;
        if production_host == host {
            return Ok(url.clone());
        }
        with_host(url, &production_host)
    }
}

fn with_host(url: &Url, host: &str) -> Result<Url, PreviewHostError> {
    let mut rewritten = url.clone();
    rewritten
        .set_host(Some(host))
        .map_err(|_| PreviewHostError::InvalidHost(host.to_string()))?;
    Ok(rewritten)
}

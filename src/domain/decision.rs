//! Redirect decision engine.
//!
//! Given a [`RequestContext`] and the [`ResolvedLink`] returned by the exchange
//! service, picks exactly one [`RedirectOutcome`]. The engine is a pure function
//! of its configuration and inputs; it performs no I/O.
//!
//! # Precedence
//!
//! 1. Preview host without `from-preview=true` renders the preview page.
//! 2. iOS/Android without `from-preview=true` bounces through the preview host.
//! 3. iPad tries `ipfl`, iPhone tries `ifl`, then the App Store listing (`isi`).
//! 4. Android tries `afl`, then the Play Store listing (`apn`).
//! 5. Everything else tries `ofl`, then `link`, then gives up with not found.

use tracing::{debug, error};
use url::Url;

use crate::domain::device::DeviceClass;
use crate::domain::preview_host::{ConfigError, PreviewHostError, PreviewHostResolver};
use crate::domain::request::{RequestContext, with_from_preview, without_query};
use crate::domain::resolved_link::{
    APP_STORE_CAMPAIGN_PARAMS, PARAM_AFL, PARAM_APN, PARAM_IFL, PARAM_IPFL, PARAM_ISI, PARAM_LINK,
    PARAM_OFL, ResolvedLink,
};
use crate::utils::query_unescape::query_unescape;

const APP_STORE_BASE_URL: &str = "https://apps.apple.com/app/id";
const PLAY_STORE_BASE_URL: &str = "https://play.google.com/store/apps/details";

/// HTTP status used for a redirect outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    /// 302, for fallback links, deep links and the preview bounce.
    Found,
    /// 307, for store listings.
    TemporaryRedirect,
}

impl RedirectStatus {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Found => 302,
            Self::TemporaryRedirect => 307,
        }
    }
}

/// Data for the social preview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPage {
    /// Production-host dynamic link carrying `from-preview=true`.
    pub dynamic_link: String,
    pub social_title: String,
    pub social_description: String,
    pub social_image_link: String,
}

/// Terminal state for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    RenderPreviewPage(PreviewPage),
    RedirectTo { url: String, status: RedirectStatus },
    NotFound,
    ServerError(String),
    /// Mobile branch with nothing to redirect to; answered with an empty body.
    NoAction,
}

impl RedirectOutcome {
    fn redirect(url: impl Into<String>, status: RedirectStatus) -> Self {
        Self::RedirectTo {
            url: url.into(),
            status,
        }
    }

    /// Short label for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RenderPreviewPage(_) => "preview_page",
            Self::RedirectTo { .. } => "redirect",
            Self::NotFound => "not_found",
            Self::ServerError(_) => "server_error",
            Self::NoAction => "no_action",
        }
    }
}

/// A present redirect-target parameter could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("Invalid '{param}' link format")]
    Unescape { param: &'static str, value: String },

    #[error("Invalid '{param}' link format")]
    NotAbsolute { param: &'static str, value: String },
}

impl ParameterError {
    pub fn param(&self) -> &'static str {
        match self {
            Self::Unescape { param, .. } | Self::NotAbsolute { param, .. } => param,
        }
    }
}

/// Failures that end a decision early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("Failed to transform to preview URL: {0}")]
    PreviewUrl(PreviewHostError),

    #[error("Failed to resolve production URL: {0}")]
    ProductionUrl(PreviewHostError),
}

impl DecisionError {
    fn preview_url(err: PreviewHostError) -> Self {
        match err {
            PreviewHostError::Config(e) => Self::Config(e),
            other => Self::PreviewUrl(other),
        }
    }

    fn production_url(err: PreviewHostError) -> Self {
        match err {
            PreviewHostError::Config(e) => Self::Config(e),
            other => Self::ProductionUrl(other),
        }
    }
}

/// Selects the redirect outcome for a request.
#[derive(Debug, Clone)]
pub struct RedirectEngine {
    resolver: PreviewHostResolver,
}

impl RedirectEngine {
    pub fn new(resolver: PreviewHostResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &PreviewHostResolver {
        &self.resolver
    }

    /// Decides the outcome, folding every error into [`RedirectOutcome::ServerError`].
    pub fn decide(&self, request: &RequestContext, link: &ResolvedLink) -> RedirectOutcome {
        match self.try_decide(request, link) {
            Ok(outcome) => outcome,
            Err(DecisionError::Parameter(err)) => {
                error!(
                    url = %request.url(),
                    param = err.param(),
                    error = %err,
                    "Failed to decide redirect"
                );
                RedirectOutcome::ServerError(err.to_string())
            }
            Err(err) => {
                error!(url = %request.url(), error = %err, "Failed to decide redirect");
                RedirectOutcome::ServerError(err.to_string())
            }
        }
    }

    /// Decides the outcome, reporting configuration and parameter failures as errors.
    ///
    /// # Errors
    ///
    /// - [`DecisionError::Config`] when the preview URL style is unrecognized
    /// - [`DecisionError::Parameter`] when a present redirect parameter is invalid
    /// - [`DecisionError::PreviewUrl`] when a mobile bounce target cannot be built
    pub fn try_decide(
        &self,
        request: &RequestContext,
        link: &ResolvedLink,
    ) -> Result<RedirectOutcome, DecisionError> {
        let from_preview = request.from_preview();
        let is_preview = self.resolver.is_preview_host(request.host())?;

        if is_preview && !from_preview {
            return self.preview_page(request, link);
        }

        let device = request.device();
        debug!(device = device.as_str(), from_preview, "Classified request");

        if device.is_mobile() && !from_preview {
            let preview_url = self
                .resolver
                .to_preview_url(request.url())
                .map_err(DecisionError::preview_url)?;
            let bounce = with_from_preview(&preview_url);
            debug!(preview_url = %bounce, "Redirecting to preview URL");
            return Ok(RedirectOutcome::redirect(bounce, RedirectStatus::Found));
        }

        if device.is_ios() {
            return ios_outcome(link, device);
        }

        match device {
            DeviceClass::Android => {
                let production_url = self
                    .resolver
                    .to_production_url(request.url())
                    .map_err(DecisionError::production_url)?;
                android_outcome(link, &production_url)
            }
            _ => web_outcome(link),
        }
    }

    fn preview_page(
        &self,
        request: &RequestContext,
        link: &ResolvedLink,
    ) -> Result<RedirectOutcome, DecisionError> {
        let production_url = self
            .resolver
            .to_production_url(request.url())
            .map_err(DecisionError::production_url)?;
        let dynamic_link = with_from_preview(&production_url);
        debug!(dynamic_link = %dynamic_link, "Handling preview page");

        Ok(RedirectOutcome::RenderPreviewPage(PreviewPage {
            dynamic_link: dynamic_link.into(),
            social_title: link.social_title().to_string(),
            social_description: link.social_description().to_string(),
            social_image_link: link.social_image_link().to_string(),
        }))
    }
}

/// Returns the first usable redirect target among `keys`, in order.
///
/// A missing key moves on to the next one. A present key that fails to
/// unescape or is not an absolute URL stops the search with an error.
pub fn redirect_candidate(
    link: &ResolvedLink,
    keys: &[&'static str],
) -> Result<Option<String>, ParameterError> {
    for &param in keys {
        let Some(raw) = link.get(param) else {
            continue;
        };

        let unescaped = query_unescape(raw).map_err(|_| {
            error!(param, value = raw, "Failed to unescape parameter");
            ParameterError::Unescape {
                param,
                value: raw.to_string(),
            }
        })?;

        if Url::parse(&unescaped).is_err() {
            error!(param, value = %unescaped, "Invalid link parameter");
            return Err(ParameterError::NotAbsolute {
                param,
                value: unescaped,
            });
        }

        return Ok(Some(unescaped));
    }

    Ok(None)
}

fn ios_outcome(link: &ResolvedLink, device: DeviceClass) -> Result<RedirectOutcome, DecisionError> {
    debug!("Handling iOS dynamic link");

    let keys: &[&'static str] = match device {
        DeviceClass::IPad => &[PARAM_IPFL],
        _ => &[PARAM_IFL],
    };
    if let Some(url) = redirect_candidate(link, keys)? {
        return Ok(RedirectOutcome::redirect(url, RedirectStatus::Found));
    }

    match link.get(PARAM_ISI) {
        Some(app_id) => {
            let url = app_store_url(app_id, link);
            debug!(redirect_url = %url, "Redirecting to App Store");
            Ok(RedirectOutcome::redirect(url, RedirectStatus::TemporaryRedirect))
        }
        None => Ok(RedirectOutcome::NoAction),
    }
}

fn android_outcome(
    link: &ResolvedLink,
    dynamic_link: &Url,
) -> Result<RedirectOutcome, DecisionError> {
    debug!("Handling Android dynamic link");

    if let Some(url) = redirect_candidate(link, &[PARAM_AFL])? {
        return Ok(RedirectOutcome::redirect(url, RedirectStatus::Found));
    }

    match link.get(PARAM_APN) {
        Some(package) => {
            let url = play_store_url(package, dynamic_link);
            debug!(redirect_url = %url, "Redirecting to Play Store");
            Ok(RedirectOutcome::redirect(url, RedirectStatus::TemporaryRedirect))
        }
        None => Ok(RedirectOutcome::NoAction),
    }
}

fn web_outcome(link: &ResolvedLink) -> Result<RedirectOutcome, DecisionError> {
    debug!("Handling web user agent");

    match redirect_candidate(link, &[PARAM_OFL, PARAM_LINK])? {
        Some(url) => Ok(RedirectOutcome::redirect(url, RedirectStatus::Found)),
        None => Ok(RedirectOutcome::NotFound),
    }
}

/// Builds the App Store listing URL, forwarding present campaign parameters.
pub fn app_store_url(app_id: &str, link: &ResolvedLink) -> String {
    let campaign: Vec<String> = APP_STORE_CAMPAIGN_PARAMS
        .iter()
        .filter_map(|&key| link.get(key).map(|value| format!("{key}={value}")))
        .collect();

    let mut url = format!("{APP_STORE_BASE_URL}{app_id}");
    if !campaign.is_empty() {
        url.push('?');
        url.push_str(&campaign.join("&"));
    }
    url
}

/// Builds the Play Store listing URL with the dynamic link as install referrer.
pub fn play_store_url(package: &str, dynamic_link: &Url) -> String {
    format!(
        "{PLAY_STORE_BASE_URL}?id={package}&referrer=tracking_id%3D{}",
        without_query(dynamic_link)
    )
}

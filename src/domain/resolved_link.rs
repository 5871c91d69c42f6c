//! Query parameters of a resolved long link.

use url::Url;

/// Fallback/desktop web URL.
pub const PARAM_LINK: &str = "link";
/// Desktop fallback URL, preferred over [`PARAM_LINK`].
pub const PARAM_OFL: &str = "ofl";
/// iPhone fallback URL.
pub const PARAM_IFL: &str = "ifl";
/// iPad fallback URL.
pub const PARAM_IPFL: &str = "ipfl";
/// Android fallback URL.
pub const PARAM_AFL: &str = "afl";
/// App Store numeric app id.
pub const PARAM_ISI: &str = "isi";
/// Android package name.
pub const PARAM_APN: &str = "apn";
/// App Store campaign parameters forwarded to the store listing, in order.
pub const APP_STORE_CAMPAIGN_PARAMS: [&str; 4] = ["at", "ct", "mt", "pt"];
pub const PARAM_SOCIAL_TITLE: &str = "st";
pub const PARAM_SOCIAL_DESCRIPTION: &str = "sd";
pub const PARAM_SOCIAL_IMAGE: &str = "si";

/// The long link's query parameters, decoded once.
///
/// Keys are case-sensitive. When a key repeats, the first value wins, and an
/// empty value is treated the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLink {
    params: Vec<(String, String)>,
}

impl ResolvedLink {
    /// Parses an absolute long link and collects its query parameters.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `long_link` is not an absolute URL.
    pub fn from_long_link(long_link: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(long_link)?;
        Ok(Self::from_pairs(url.query_pairs().into_owned()))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the first value for `key`, or `None` when that first value is
    /// empty. Later values for the same key are never consulted.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Social preview title (`st`), empty when absent.
    pub fn social_title(&self) -> &str {
        self.get(PARAM_SOCIAL_TITLE).unwrap_or_default()
    }

    /// Social preview description (`sd`), empty when absent.
    pub fn social_description(&self) -> &str {
        self.get(PARAM_SOCIAL_DESCRIPTION).unwrap_or_default()
    }

    /// Social preview image link (`si`), empty when absent.
    pub fn social_image_link(&self) -> &str {
        self.get(PARAM_SOCIAL_IMAGE).unwrap_or_default()
    }

    /// Re-encodes the parameters as a query string, for logging.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

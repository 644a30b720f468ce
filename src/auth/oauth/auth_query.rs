//! Parsed OAuth callback query parameters.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// The query parameters of an OAuth install callback.
///
/// Every parameter is kept (percent-decoded), not only the well-known ones,
/// because the platform signs all of them. Keys are held in sorted order so
/// [`signable_string`](Self::signable_string) is deterministic.
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::oauth::AuthQuery;
///
/// let query = AuthQuery::parse("shop=a.myshopify.com&code=xyz&hmac=00");
/// assert_eq!(query.code(), Some("xyz"));
/// assert_eq!(query.signable_string(), "code=xyz&shop=a.myshopify.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthQuery {
    params: BTreeMap<String, String>,
}

impl AuthQuery {
    /// Name of the parameter carrying the hex-encoded signature.
    pub const HMAC_PARAM: &'static str = "hmac";

    /// Parses a raw query string, with or without a leading `?`.
    ///
    /// When a key repeats, the last value wins.
    #[must_use]
    pub fn parse(raw_query: &str) -> Self {
        let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
        let params = form_urlencoded::parse(raw_query.as_bytes())
            .into_owned()
            .collect();
        Self { params }
    }

    /// Returns the decoded value of any parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The authorization code to exchange for an access token.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.get("code")
    }

    /// The shop domain that initiated the install.
    #[must_use]
    pub fn shop(&self) -> Option<&str> {
        self.get("shop")
    }

    /// The state nonce echoed back from the authorization request.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.get("state")
    }

    /// The callback timestamp, seconds since epoch, as sent.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.get("timestamp")
    }

    /// The hex-encoded HMAC.
    #[must_use]
    pub fn hmac(&self) -> Option<&str> {
        self.get(Self::HMAC_PARAM)
    }

    /// The base64-encoded admin host, sent to embedded apps.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    /// Builds the message the platform signed: every parameter except `hmac`,
    /// sorted by key, form-urlencoded and joined with `&`.
    #[must_use]
    pub fn signable_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                self.params
                    .iter()
                    .filter(|(key, _)| key.as_str() != Self::HMAC_PARAM),
            )
            .finish()
    }
}

//! Raw response type and Shopify-specific header parsing.

use std::collections::HashMap;
use std::time::Duration;

/// REST call-bucket reading from `X-Shopify-Shop-Api-Call-Limit`.
///
/// The header is formatted `used/bucketSize`, e.g. `40/80`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Calls used in the current window.
    pub request_count: u32,
    /// Total bucket size.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses a call-limit header value. Returns `None` if malformed.
    ///
    /// ```rust
    /// use shopify_admin::clients::ApiCallLimit;
    ///
    /// let limit = ApiCallLimit::parse("39/40").unwrap();
    /// assert_eq!(limit.available(), 1);
    /// assert!(ApiCallLimit::parse("40").is_none());
    /// ```
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (used, size) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: used.trim().parse().ok()?,
            bucket_size: size.trim().parse().ok()?,
        })
    }

    /// Remaining bucket slots.
    #[must_use]
    pub const fn available(&self) -> u32 {
        self.bucket_size.saturating_sub(self.request_count)
    }
}

/// A response as received from the Admin API, before engine-specific decoding.
///
/// Header names are lowercased.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Parsed call-limit header, if present and well-formed.
    pub api_call_limit: Option<ApiCallLimit>,
    /// Parsed `Retry-After` header, if present and a non-negative number of seconds.
    pub retry_after: Option<Duration>,
}

impl HttpResponse {
    /// Creates a response, parsing the rate-limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        let api_call_limit = first("x-shopify-shop-api-call-limit")
            .and_then(|value| ApiCallLimit::parse(value));

        let retry_after = first("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());

        Self {
            code,
            headers,
            body,
            api_call_limit,
            retry_after,
        }
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` for `429 Too Many Requests`.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.code == 429
    }

    /// Returns the `X-Request-Id` header value.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Link` header value.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.header("link")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }
}

//! Webhook signature verification.
//!
//! The platform signs each delivery by computing HMAC-SHA256 over the raw
//! request body, hex-encoding the digest and base64-encoding that hex string.
//! The result arrives in the `X-Shopify-Hmac-SHA256` header.
//!
//! Verification needs the body exactly as received. Buffer it fully and do
//! not pass it on to any handler until [`verify_webhook`] succeeds.

use reqwest::header::HeaderMap;

use crate::auth::hmac::{compute_webhook_signature, constant_time_compare};
use crate::config::AppConfig;
use crate::webhooks::WebhookError;

/// Header carrying the webhook signature.
pub const HEADER_HMAC: &str = "X-Shopify-Hmac-SHA256";

/// Header carrying the webhook topic, e.g. `orders/create`.
pub const HEADER_TOPIC: &str = "X-Shopify-Topic";

/// Header carrying the originating shop's domain.
pub const HEADER_SHOP_DOMAIN: &str = "X-Shopify-Shop-Domain";

/// Header carrying the API version the payload was rendered with.
pub const HEADER_API_VERSION: &str = "X-Shopify-API-Version";

/// Header carrying the delivery's unique ID, useful for de-duplication.
pub const HEADER_WEBHOOK_ID: &str = "X-Shopify-Webhook-Id";

/// A buffered, not yet verified webhook delivery.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    body: Vec<u8>,
    hmac_header: String,
    topic: Option<String>,
    shop_domain: Option<String>,
    api_version: Option<String>,
    webhook_id: Option<String>,
}

impl WebhookRequest {
    /// Creates a request from values already pulled out of the HTTP request.
    #[must_use]
    pub fn new(
        body: Vec<u8>,
        hmac_header: String,
        topic: Option<String>,
        shop_domain: Option<String>,
        api_version: Option<String>,
        webhook_id: Option<String>,
    ) -> Self {
        Self {
            body,
            hmac_header,
            topic,
            shop_domain,
            api_version,
            webhook_id,
        }
    }

    /// Collects the webhook headers from a header map.
    ///
    /// A missing signature header becomes an empty string, which never verifies.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, body: Vec<u8>) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
        };

        Self::new(
            body,
            header(HEADER_HMAC).unwrap_or_default(),
            header(HEADER_TOPIC),
            header(HEADER_SHOP_DOMAIN),
            header(HEADER_API_VERSION),
            header(HEADER_WEBHOOK_ID),
        )
    }

    /// The raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The signature header value.
    #[must_use]
    pub fn hmac_header(&self) -> &str {
        &self.hmac_header
    }

    /// The `X-Shopify-Topic` header value, e.g. `orders/create`.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// The `X-Shopify-Shop-Domain` header value.
    #[must_use]
    pub fn shop_domain(&self) -> Option<&str> {
        self.shop_domain.as_deref()
    }

    /// The `X-Shopify-API-Version` header value.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// The `X-Shopify-Webhook-Id` header value.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }
}

/// Metadata of a webhook whose signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookContext {
    topic: Option<String>,
    shop_domain: Option<String>,
    api_version: Option<String>,
    webhook_id: Option<String>,
}

impl WebhookContext {
    /// The webhook topic.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// The shop that sent the delivery.
    #[must_use]
    pub fn shop_domain(&self) -> Option<&str> {
        self.shop_domain.as_deref()
    }

    /// The API version the payload was serialized with.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// The delivery id, stable across retries of the same event.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }
}

/// Checks a webhook signature header against a raw body under one secret.
///
/// The expected header value is recomputed and compared in constant time.
///
/// # Example
///
/// ```rust
/// use shopify_admin::webhooks::verify_hmac;
///
/// let header = "MzE4OWFmOThjYmIyODA2ZmZmZWFmMjdmYzQ2ZTg3MTM1M2FmZTNlYmMzMGYzNTNkMDA0ZjQyNjkxMGZjNzEzNA==";
/// assert!(verify_hmac(b"webhook request body", header, "hush"));
/// assert!(!verify_hmac(b"webhook request body", "wronghash", "hush"));
/// ```
#[must_use]
pub fn verify_hmac(raw_body: &[u8], hmac_header: &str, secret: &str) -> bool {
    let computed = compute_webhook_signature(raw_body, secret);
    constant_time_compare(computed.as_bytes(), hmac_header.trim().as_bytes())
}

/// Verifies a webhook delivery and returns its metadata.
///
/// The current secret is tried first, then `old_api_secret_key` if configured.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidHmac`] if no secret produces the header value.
pub fn verify_webhook(
    request: &WebhookRequest,
    config: &AppConfig,
) -> Result<WebhookContext, WebhookError> {
    let verified = config
        .secrets()
        .any(|secret| verify_hmac(request.body(), request.hmac_header(), secret.as_ref()));

    if !verified {
        tracing::warn!(
            topic = ?request.topic(),
            shop = ?request.shop_domain(),
            "Webhook failed HMAC verification"
        );
        return Err(WebhookError::InvalidHmac);
    }

    Ok(WebhookContext {
        topic: request.topic.clone(),
        shop_domain: request.shop_domain.clone(),
        api_version: request.api_version.clone(),
        webhook_id: request.webhook_id.clone(),
    })
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookRequest>();
    assert_send_sync::<WebhookContext>();
};

//! Integration tests for OAuth callback and webhook verification.

use reqwest::header::{HeaderMap, HeaderValue};
use shopify_admin::auth::hmac::{compute_signature, compute_webhook_signature};
use shopify_admin::auth::oauth::{verify_auth_callback, AuthQuery, OAuthError};
use shopify_admin::webhooks::{
    verify_hmac, verify_webhook, WebhookError, WebhookRequest, HEADER_API_VERSION, HEADER_HMAC,
    HEADER_SHOP_DOMAIN, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};
use shopify_admin::{ApiKey, ApiSecretKey, AppConfig};

const CALLBACK: &str = "code=0907a61c0c8d55e99db179b68161bc00&hmac=700e2dadb827fcc8609e9d5ce208b2e9cdaab9df07390d2cbca10d7c328fc4bf&shop=some-shop.myshopify.com&state=0.6784241404160823&timestamp=1337178173";

const WEBHOOK_BODY: &[u8] = b"webhook request body";
const WEBHOOK_HMAC: &str =
    "MzE4OWFmOThjYmIyODA2ZmZmZWFmMjdmYzQ2ZTg3MTM1M2FmZTNlYmMzMGYzNTNkMDA0ZjQyNjkxMGZjNzEzNA==";

fn config(secret: &str) -> AppConfig {
    AppConfig::builder()
        .api_key(ApiKey::new("key").unwrap())
        .api_secret_key(ApiSecretKey::new(secret).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// OAuth Callback
// ============================================================================

#[test]
fn test_known_callback_verifies() {
    let query = verify_auth_callback(&config("hush"), CALLBACK).unwrap();
    assert_eq!(query.state(), Some("0.6784241404160823"));
    assert_eq!(query.timestamp(), Some("1337178173"));
}

#[test]
fn test_callback_with_leading_question_mark_verifies() {
    assert!(verify_auth_callback(&config("hush"), &format!("?{CALLBACK}")).is_ok());
}

#[test]
fn test_tampered_callback_is_rejected() {
    let cases = [
        CALLBACK.replace("timestamp=1337178173", "timestamp=133717817"),
        CALLBACK.replace("some-shop", "other-shop"),
        format!("{CALLBACK}&extra=1"),
        CALLBACK.replace("hmac=700e", "hmac=700f"),
    ];
    for callback in cases {
        assert!(
            matches!(
                verify_auth_callback(&config("hush"), &callback),
                Err(OAuthError::InvalidHmac)
            ),
            "{callback}"
        );
    }
}

#[test]
fn test_callback_signed_over_percent_encoded_values() {
    let unsigned = "code=abc&host=YWRtaW4uc2hvcGlmeS5jb20vc3RvcmUvdGVzdA%3D%3D&shop=test-shop.myshopify.com&timestamp=1700000000";
    let signable = AuthQuery::parse(unsigned).signable_string();
    let hmac = compute_signature(signable.as_bytes(), "hush");

    let query = verify_auth_callback(&config("hush"), &format!("{unsigned}&hmac={hmac}")).unwrap();
    assert_eq!(query.host(), Some("YWRtaW4uc2hvcGlmeS5jb20vc3RvcmUvdGVzdA=="));
}

// ============================================================================
// Webhooks
// ============================================================================

fn webhook_headers(hmac: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let mut set = |name: &'static str, value: &str| {
        headers.insert(name, HeaderValue::from_str(value).unwrap());
    };
    set("x-shopify-hmac-sha256", hmac);
    set("x-shopify-topic", "orders/create");
    set("x-shopify-shop-domain", "test-shop.myshopify.com");
    set("x-shopify-api-version", "2021-10");
    set("x-shopify-webhook-id", "b54557e4-bdd9-4b37-8a5f-bf7d70bcd043");
    headers
}

#[test]
fn test_header_constants_match_platform_names() {
    assert_eq!(HEADER_HMAC, "X-Shopify-Hmac-SHA256");
    assert_eq!(HEADER_TOPIC, "X-Shopify-Topic");
    assert_eq!(HEADER_SHOP_DOMAIN, "X-Shopify-Shop-Domain");
    assert_eq!(HEADER_API_VERSION, "X-Shopify-API-Version");
    assert_eq!(HEADER_WEBHOOK_ID, "X-Shopify-Webhook-Id");
}

#[test]
fn test_known_webhook_verifies() {
    assert!(verify_hmac(WEBHOOK_BODY, WEBHOOK_HMAC, "hush"));
    assert_eq!(compute_webhook_signature(WEBHOOK_BODY, "hush"), WEBHOOK_HMAC);

    let request = WebhookRequest::from_headers(&webhook_headers(WEBHOOK_HMAC), WEBHOOK_BODY.to_vec());
    let context = verify_webhook(&request, &config("hush")).unwrap();
    assert_eq!(context.topic(), Some("orders/create"));
    assert_eq!(context.shop_domain(), Some("test-shop.myshopify.com"));
    assert_eq!(context.api_version(), Some("2021-10"));
    assert_eq!(context.webhook_id(), Some("b54557e4-bdd9-4b37-8a5f-bf7d70bcd043"));
}

#[test]
fn test_wrong_hash_is_rejected() {
    let request = WebhookRequest::from_headers(&webhook_headers("wronghash"), WEBHOOK_BODY.to_vec());
    assert_eq!(
        verify_webhook(&request, &config("hush")),
        Err(WebhookError::InvalidHmac)
    );
}

#[test]
fn test_modified_body_is_rejected() {
    let request = WebhookRequest::from_headers(
        &webhook_headers(WEBHOOK_HMAC),
        b"webhook request body ".to_vec(),
    );
    assert_eq!(
        verify_webhook(&request, &config("hush")),
        Err(WebhookError::InvalidHmac)
    );
}

#[test]
fn test_wrong_secret_is_rejected() {
    let request = WebhookRequest::from_headers(&webhook_headers(WEBHOOK_HMAC), WEBHOOK_BODY.to_vec());
    assert!(verify_webhook(&request, &config("not-hush")).is_err());
}

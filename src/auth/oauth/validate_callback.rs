//! OAuth callback verification.

use crate::auth::hmac::{hex, verify_any};
use crate::auth::oauth::{AuthQuery, OAuthError};
use crate::config::{AppConfig, ShopDomain};

/// Verifies an OAuth install callback and returns its parsed parameters.
///
/// The `hmac` parameter is hex-decoded and checked in constant time against
/// [`AuthQuery::signable_string`], first under the current secret and then
/// under `old_api_secret_key` if one is configured. Only a signed callback
/// has its `shop` parameter inspected.
///
/// # Errors
///
/// - [`OAuthError::InvalidHmac`] if `hmac` is missing, is not hex, or does
///   not match under any secret
/// - [`OAuthError::InvalidCallback`] if `shop` is missing or not a valid
///   shop domain
///
/// # Example
///
/// ```rust
/// use shopify_admin::{ApiKey, ApiSecretKey, AppConfig};
/// use shopify_admin::auth::hmac::compute_signature;
/// use shopify_admin::auth::oauth::verify_auth_callback;
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret_key(ApiSecretKey::new("hush").unwrap())
///     .build()
///     .unwrap();
///
/// let unsigned = "code=abc&shop=my-store.myshopify.com&timestamp=1700000000";
/// let hmac = compute_signature(unsigned.as_bytes(), "hush");
/// let query = verify_auth_callback(&config, &format!("{unsigned}&hmac={hmac}")).unwrap();
/// assert_eq!(query.code(), Some("abc"));
/// ```
pub fn verify_auth_callback(config: &AppConfig, raw_query: &str) -> Result<AuthQuery, OAuthError> {
    let query = AuthQuery::parse(raw_query);

    let provided = query
        .hmac()
        .and_then(hex::decode)
        .ok_or(OAuthError::InvalidHmac)?;

    if !verify_any(config.secrets(), query.signable_string().as_bytes(), &provided) {
        tracing::warn!(shop = ?query.shop(), "OAuth callback failed HMAC verification");
        return Err(OAuthError::InvalidHmac);
    }

    let shop = query.shop().ok_or_else(|| OAuthError::InvalidCallback {
        reason: "missing 'shop' parameter".to_string(),
    })?;
    ShopDomain::new(shop).map_err(|_| OAuthError::InvalidCallback {
        reason: format!("Invalid shop domain: {shop}"),
    })?;

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hmac::compute_signature;
    use crate::config::{ApiKey, ApiSecretKey};

    const SIGNED_QUERY: &str = "code=0907a61c0c8d55e99db179b68161bc00&hmac=700e2dadb827fcc8609e9d5ce208b2e9cdaab9df07390d2cbca10d7c328fc4bf&shop=some-shop.myshopify.com&state=0.6784241404160823&timestamp=1337178173";

    fn config_with(secret: &str) -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new(secret).unwrap())
            .build()
            .unwrap()
    }

    fn sign(unsigned: &str, secret: &str) -> String {
        let hmac = compute_signature(AuthQuery::parse(unsigned).signable_string().as_bytes(), secret);
        format!("{unsigned}&hmac={hmac}")
    }

    #[test]
    fn test_accepts_known_signed_callback() {
        let query = verify_auth_callback(&config_with("hush"), SIGNED_QUERY).unwrap();
        assert_eq!(query.code(), Some("0907a61c0c8d55e99db179b68161bc00"));
        assert_eq!(query.shop(), Some("some-shop.myshopify.com"));
    }

    #[test]
    fn test_parameter_order_does_not_matter() {
        let reordered = "timestamp=1337178173&state=0.6784241404160823&shop=some-shop.myshopify.com&hmac=700e2dadb827fcc8609e9d5ce208b2e9cdaab9df07390d2cbca10d7c328fc4bf&code=0907a61c0c8d55e99db179b68161bc00";
        assert!(verify_auth_callback(&config_with("hush"), reordered).is_ok());
    }

    #[test]
    fn test_accepts_uppercase_hex() {
        let upper = SIGNED_QUERY.replace(
            "700e2dadb827fcc8609e9d5ce208b2e9cdaab9df07390d2cbca10d7c328fc4bf",
            "700E2DADB827FCC8609E9D5CE208B2E9CDAAB9DF07390D2CBCA10D7C328FC4BF",
        );
        assert!(verify_auth_callback(&config_with("hush"), &upper).is_ok());
    }

    #[test]
    fn test_rejects_tampered_timestamp() {
        let tampered = SIGNED_QUERY.replace("timestamp=1337178173", "timestamp=133717817");
        assert!(matches!(
            verify_auth_callback(&config_with("hush"), &tampered),
            Err(OAuthError::InvalidHmac)
        ));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        assert!(matches!(
            verify_auth_callback(&config_with("not-hush"), SIGNED_QUERY),
            Err(OAuthError::InvalidHmac)
        ));
    }

    #[test]
    fn test_rejects_missing_or_malformed_hmac() {
        let config = config_with("hush");
        let unsigned = "code=abc&shop=some-shop.myshopify.com";
        assert!(matches!(
            verify_auth_callback(&config, unsigned),
            Err(OAuthError::InvalidHmac)
        ));
        assert!(matches!(
            verify_auth_callback(&config, &format!("{unsigned}&hmac=not-hex")),
            Err(OAuthError::InvalidHmac)
        ));
    }

    #[test]
    fn test_falls_back_to_old_secret() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("new-secret").unwrap())
            .old_api_secret_key(ApiSecretKey::new("hush").unwrap())
            .build()
            .unwrap();
        assert!(verify_auth_callback(&config, SIGNED_QUERY).is_ok());
    }

    #[test]
    fn test_rejects_signed_callback_with_invalid_shop() {
        let signed = sign("code=abc&shop=evil.example.com&timestamp=1", "hush");
        match verify_auth_callback(&config_with("hush"), &signed) {
            Err(OAuthError::InvalidCallback { reason }) => {
                assert!(reason.contains("evil.example.com"));
            }
            other => panic!("Expected InvalidCallback, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_signed_callback_without_shop() {
        let signed = sign("code=abc&timestamp=1", "hush");
        assert!(matches!(
            verify_auth_callback(&config_with("hush"), &signed),
            Err(OAuthError::InvalidCallback { .. })
        ));
    }
}

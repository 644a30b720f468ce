//! Session-token claims.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ShopDomain;

/// The claims of an embedded-app session token.
///
/// Timestamps are seconds since epoch. Claims missing from the token decode
/// to their default (`0` or empty) and then fail validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    /// Issuer, e.g. `https://shop.myshopify.com/admin`.
    pub iss: String,
    /// Destination shop, e.g. `https://shop.myshopify.com`.
    pub dest: String,
    /// Audience; the app's API key.
    pub aud: String,
    /// Subject; the user ID for admin sessions.
    pub sub: String,
    /// Expiry.
    pub exp: i64,
    /// Not before.
    pub nbf: i64,
    /// Issued at.
    pub iat: i64,
    /// Token ID.
    pub jti: String,
    /// Session ID.
    pub sid: String,
}

impl Payload {
    /// The shop from the `dest` claim, e.g. `my-store.myshopify.com`.
    #[must_use]
    pub fn shop(&self) -> Option<ShopDomain> {
        let dest = Url::parse(&self.dest).ok()?;
        ShopDomain::new(dest.host_str()?).ok()
    }

    /// The numeric user ID, for tokens issued by the admin (`iss` ends in
    /// `/admin`) with a numeric `sub`.
    #[must_use]
    pub fn shopify_user_id(&self) -> Option<u64> {
        if !self.iss.ends_with("/admin") {
            return None;
        }
        if self.sub.is_empty() || !self.sub.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        self.sub.parse().ok()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Payload>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(iss: &str, sub: &str) -> Payload {
        Payload {
            iss: iss.to_string(),
            dest: "https://test-shop.myshopify.com".to_string(),
            sub: sub.to_string(),
            ..Payload::default()
        }
    }

    #[test]
    fn test_shop_reads_dest_host() {
        let shop = payload("https://test-shop.myshopify.com/admin", "42").shop();
        assert_eq!(shop.unwrap().as_ref(), "test-shop.myshopify.com");
    }

    #[test]
    fn test_shop_is_none_for_foreign_dest() {
        let mut claims = payload("", "");
        claims.dest = "https://example.com".to_string();
        assert!(claims.shop().is_none());
        claims.dest = "not a url".to_string();
        assert!(claims.shop().is_none());
    }

    #[test]
    fn test_shopify_user_id_for_admin_tokens() {
        let claims = payload("https://test-shop.myshopify.com/admin", "12345");
        assert_eq!(claims.shopify_user_id(), Some(12345));
    }

    #[test]
    fn test_shopify_user_id_none_outside_admin_or_non_numeric() {
        assert_eq!(
            payload("https://test-shop.myshopify.com", "12345").shopify_user_id(),
            None
        );
        assert_eq!(
            payload("https://test-shop.myshopify.com/admin", "gid://user/1").shopify_user_id(),
            None
        );
        assert_eq!(
            payload("https://test-shop.myshopify.com/admin", "").shopify_user_id(),
            None
        );
    }

    #[test]
    fn test_missing_claims_decode_to_defaults() {
        let claims: Payload = serde_json::from_str(r#"{"aud": "key", "exp": 10}"#).unwrap();
        assert_eq!(claims.aud, "key");
        assert_eq!(claims.exp, 10);
        assert_eq!(claims.nbf, 0);
        assert!(claims.iss.is_empty());
    }
}

//! Configuration types for the Admin API client and request verification.
//!
//! # Overview
//!
//! - [`ClientConfig`] / [`ClientConfigBuilder`]: everything a [`Client`](crate::Client)
//!   needs to talk to one shop (domain, token, version, timeout, retry bound)
//! - [`ThrottlePolicy`]: proactive-wait thresholds and sleep intervals for both
//!   rate-limit models
//! - [`AppConfig`] / [`AppConfigBuilder`]: app credentials used to verify inbound
//!   OAuth callbacks, webhooks and session tokens
//! - Validated newtypes: [`ApiKey`], [`ApiSecretKey`], [`AccessToken`],
//!   [`ShopDomain`], [`HostUrl`], [`ApiVersion`]
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{AccessToken, ClientConfig, ShopDomain};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 2);
//! assert_eq!(config.base_url(), "https://my-store.myshopify.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ApiKey, ApiSecretKey, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of attempts per call.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Thresholds and wait intervals for the two throttling models.
///
/// REST reports a discrete call bucket (`X-Shopify-Shop-Api-Call-Limit`),
/// GraphQL a continuous cost budget (`extensions.cost.throttleStatus`). After
/// a successful call leaves fewer than the engine's threshold available, the
/// engine waits `proactive_wait` before returning so the next call is less
/// likely to be throttled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrottlePolicy {
    /// Remaining bucket slots below which a REST call waits.
    pub rest_threshold: u32,
    /// Remaining cost points below which a GraphQL call waits.
    pub graphql_threshold: u32,
    /// Wait applied after a low-headroom success.
    pub proactive_wait: Duration,
    /// Wait before retrying a GraphQL throttle error.
    pub graphql_retry_wait: Duration,
    /// Wait before retrying a 429 whose `Retry-After` is absent or unreadable.
    pub default_retry_after: Duration,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            rest_threshold: 2,
            graphql_threshold: 50,
            proactive_wait: Duration::from_secs(2),
            graphql_retry_wait: Duration::from_secs(2),
            default_retry_after: Duration::from_secs(1),
        }
    }
}

/// Configuration for one [`Client`](crate::Client).
///
/// Immutable once built. `Clone`, `Send` and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    shop: ShopDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    timeout: Duration,
    max_retries: u32,
    api_host: Option<HostUrl>,
    throttle: ThrottlePolicy,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the maximum number of attempts per call.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the throttle policy.
    #[must_use]
    pub const fn throttle(&self) -> &ThrottlePolicy {
        &self.throttle
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request origin: the host override, or `https://{shop}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.api_host.as_ref().map_or_else(
            || format!("https://{}", self.shop),
            |host| host.as_ref().to_string(),
        )
    }

    /// Returns the versioned Admin API path prefix, e.g. `/admin/api/2021-10`.
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/admin/api/{}", self.api_version)
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
    assert_send_sync::<AppConfig>();
};

/// Builder for [`ClientConfig`].
///
/// `shop` and `access_token` are required.
///
/// # Defaults
///
/// - `api_version`: `2021-10`
/// - `timeout`: 10 seconds
/// - `max_retries`: 2
/// - `api_host`: `None` (requests go to `https://{shop}`)
/// - `throttle`: [`ThrottlePolicy::default()`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    api_host: Option<HostUrl>,
    throttle: Option<ThrottlePolicy>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of attempts per call. Must be at least 1.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sends requests to `host` instead of `https://{shop}`.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Overrides the throttle policy.
    #[must_use]
    pub fn throttle(mut self, throttle: ThrottlePolicy) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` or
    /// `access_token` is unset, and [`ConfigError::InvalidMaxRetries`] if
    /// `max_retries` is 0.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries { value: max_retries });
        }

        Ok(ClientConfig {
            shop,
            access_token,
            api_version: self.api_version.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries,
            api_host: self.api_host,
            throttle: self.throttle.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// App credentials used to verify requests that claim to come from Shopify.
///
/// # Key Rotation
///
/// When `old_api_secret_key` is set, every signature check tries the current
/// secret first and then the old one, so callbacks, webhooks and session
/// tokens signed before a rotation still verify.
///
/// # Example
///
/// ```rust
/// use shopify_admin::{ApiKey, ApiSecretKey, AppConfig};
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret_key(ApiSecretKey::new("new-secret").unwrap())
///     .old_api_secret_key(ApiSecretKey::new("old-secret").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.secrets().count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct AppConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    old_api_secret_key: Option<ApiSecretKey>,
}

impl AppConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the current API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the previous API secret key, if configured.
    #[must_use]
    pub const fn old_api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.old_api_secret_key.as_ref()
    }

    /// Iterates the secrets to try, current first.
    pub fn secrets(&self) -> impl Iterator<Item = &ApiSecretKey> {
        std::iter::once(&self.api_secret_key).chain(self.old_api_secret_key.as_ref())
    }
}

/// Builder for [`AppConfig`]. `api_key` and `api_secret_key` are required.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    old_api_secret_key: Option<ApiSecretKey>,
}

impl AppConfigBuilder {
    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret key (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the previous secret key, accepted during key rotation.
    #[must_use]
    pub fn old_api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.old_api_secret_key = Some(key);
        self
    }

    /// Builds the [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret_key` is unset.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self
            .api_secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret_key",
            })?;

        Ok(AppConfig {
            api_key,
            api_secret_key,
            old_api_secret_key: self.old_api_secret_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> ShopDomain {
        ShopDomain::new("my-store").unwrap()
    }

    fn token() -> AccessToken {
        AccessToken::new("shpat_test").unwrap()
    }

    // === ClientConfig ===

    #[test]
    fn test_builder_requires_shop() {
        let result = ClientConfig::builder().access_token(token()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = ClientConfig::builder().shop(shop()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_defaults() {
        let config = ClientConfig::builder()
            .shop(shop())
            .access_token(token())
            .build()
            .unwrap();

        assert_eq!(config.api_version().to_string(), "2021-10");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries(), 2);
        assert!(config.api_host().is_none());
        assert_eq!(config.throttle(), &ThrottlePolicy::default());
        assert_eq!(config.base_url(), "https://my-store.myshopify.com");
        assert_eq!(config.base_path(), "/admin/api/2021-10");
    }

    #[test]
    fn test_builder_rejects_zero_retries() {
        let result = ClientConfig::builder()
            .shop(shop())
            .access_token(token())
            .max_retries(0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidMaxRetries { value: 0 })
        ));
    }

    #[test]
    fn test_api_host_overrides_base_url() {
        let config = ClientConfig::builder()
            .shop(shop())
            .access_token(token())
            .api_host(HostUrl::new("http://127.0.0.1:9000").unwrap())
            .api_version(ApiVersion::Unstable)
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.base_path(), "/admin/api/unstable");
    }

    #[test]
    fn test_config_debug_hides_token() {
        let config = ClientConfig::builder()
            .shop(shop())
            .access_token(token())
            .build()
            .unwrap();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("shpat_test"));
    }

    #[test]
    fn test_throttle_policy_defaults() {
        let policy = ThrottlePolicy::default();
        assert_eq!(policy.rest_threshold, 2);
        assert_eq!(policy.graphql_threshold, 50);
        assert_eq!(policy.proactive_wait, Duration::from_secs(2));
        assert_eq!(policy.graphql_retry_wait, Duration::from_secs(2));
        assert_eq!(policy.default_retry_after, Duration::from_secs(1));
    }

    // === AppConfig ===

    #[test]
    fn test_app_config_requires_fields() {
        let result = AppConfig::builder()
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));

        let result = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "api_secret_key"
            })
        ));
    }

    #[test]
    fn test_app_config_secrets_order() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("new").unwrap())
            .build()
            .unwrap();
        let secrets: Vec<&str> = config.secrets().map(AsRef::as_ref).collect();
        assert_eq!(secrets, vec!["new"]);

        let config = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("new").unwrap())
            .old_api_secret_key(ApiSecretKey::new("old").unwrap())
            .build()
            .unwrap();
        let secrets: Vec<&str> = config.secrets().map(AsRef::as_ref).collect();
        assert_eq!(secrets, vec!["new", "old"]);
    }
}

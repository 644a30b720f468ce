//! # Shopify Admin API client
//!
//! An async client for the Shopify Admin API, plus the verifiers an app needs
//! for requests that arrive from the platform.
//!
//! ## Overview
//!
//! - [`Client`]: REST and GraphQL calls for one shop, sharing one rate-limit
//!   state, retrying throttled calls and slowing down when headroom runs low
//! - [`clients::Pagination`]: cursors from the REST `Link` header
//! - [`auth::oauth`]: install-callback verification and code exchange
//! - [`auth::session_token`]: embedded-app session-token validation
//! - [`webhooks`]: webhook signature verification
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_admin::{AccessToken, ApiVersion, Client, ClientConfig, ShopDomain};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version("2021-10".parse::<ApiVersion>().unwrap())
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! let client = Client::new(config).unwrap();
//! assert_eq!(client.config().base_path(), "/admin/api/2021-10");
//! ```
//!
//! ## Paginating a REST collection
//!
//! ```rust,ignore
//! let mut query = HashMap::from([("limit".to_string(), "50".to_string())]);
//! loop {
//!     let page = client.get("products", Some(query.clone())).await?;
//!     process(&page.body["products"]);
//!     let Some(next) = page.pagination.next else { break };
//!     query = HashMap::from([("page_info".to_string(), next)]);
//! }
//! ```
//!
//! ## Verifying inbound requests
//!
//! ```rust
//! use shopify_admin::{ApiKey, ApiSecretKey, AppConfig};
//! use shopify_admin::auth::oauth::verify_auth_callback;
//!
//! let app = AppConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("hush").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let callback = "code=0907a61c0c8d55e99db179b68161bc00\
//!     &hmac=700e2dadb827fcc8609e9d5ce208b2e9cdaab9df07390d2cbca10d7c328fc4bf\
//!     &shop=some-shop.myshopify.com&state=0.6784241404160823&timestamp=1337178173";
//! assert!(verify_auth_callback(&app, callback).is_ok());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and rate-limit state live in a [`Client`]
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: built on Tokio and `reqwest`

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod webhooks;

pub use config::{
    AccessToken, ApiKey, ApiSecretKey, ApiVersion, AppConfig, AppConfigBuilder, ClientConfig,
    ClientConfigBuilder, HostUrl, ShopDomain, ThrottlePolicy,
};
pub use error::ConfigError;

pub use clients::{
    Client, ClientError, GraphqlError, HttpError, Pagination, RateLimitedError, RestError,
    RestResponse,
};

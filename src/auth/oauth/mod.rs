//! OAuth installation callback handling.
//!
//! After a merchant approves an install, the platform redirects to the app's
//! callback with `code`, `hmac`, `shop`, `state` and `timestamp` parameters.
//!
//! 1. [`verify_auth_callback`] checks the `hmac` parameter against the other
//!    parameters and validates `shop`.
//! 2. [`exchange_access_token`] trades the `code` for an offline access token.
//!
//! Building the authorization URL and tracking the `state` nonce are left to
//! the application.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::auth::oauth::{exchange_access_token, verify_auth_callback};
//! use shopify_admin::ShopDomain;
//!
//! let query = verify_auth_callback(&app_config, request_query_string)?;
//! if query.state() != Some(stored_state.as_str()) {
//!     return Err(reject());
//! }
//! let shop = ShopDomain::new(query.shop().unwrap_or_default())?;
//! let token = exchange_access_token(&app_config, &shop, query.code().unwrap_or_default()).await?;
//! ```

mod access_token;
mod auth_query;
mod error;
mod validate_callback;

pub use access_token::{exchange_access_token, AccessTokenResponse};
pub use auth_query::AuthQuery;
pub use error::OAuthError;
pub use validate_callback::verify_auth_callback;

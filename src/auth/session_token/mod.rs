//! Embedded-app session tokens.
//!
//! App Bridge sends a short-lived, HMAC-SHA256 signed token with each request
//! from an embedded app as `Authorization: Bearer <token>`. Validation runs
//! in three stages and stops at the first failure:
//!
//! 1. Decode: three dot-separated segments, `HS256` header, JSON claims.
//! 2. Claims: `exp`, `nbf`, `iat`, `aud`, then `iss`/`dest` hosts.
//! 3. Signature: HMAC over `header.payload` under the app secret.
//!
//! | Error | Status |
//! |-------|--------|
//! | [`SessionTokenError::NoTokenFound`] | 400 |
//! | [`SessionTokenError::InvalidToken`] | 400 |
//! | [`SessionTokenError::TokenExpired`] | 401 |
//! | [`SessionTokenError::SignatureInvalid`] | 401 |
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::auth::session_token::verify_session_request;
//!
//! match verify_session_request(request.headers(), &app_config) {
//!     Ok(payload) => handle(payload.shop(), payload.shopify_user_id()),
//!     Err(error) => respond(error.status_code(), error.to_string()),
//! }
//! ```

mod errors;
mod payload;
mod validate;

pub use errors::SessionTokenError;
pub use payload::Payload;
pub use validate::{
    decode_session_token, token_from_authorization, token_from_headers, validate,
    validate_session_token, verify_session_request, verify_token_signature,
};

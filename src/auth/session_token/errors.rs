//! Session-token error types.

use thiserror::Error;

/// Why a session token was rejected.
///
/// Each kind maps to the status an HTTP boundary should answer with, so
/// callers can tell "fetch a fresh token" (401) apart from "this request is
/// malformed" (400).
///
/// ```rust
/// use shopify_admin::auth::session_token::SessionTokenError;
///
/// assert_eq!(SessionTokenError::TokenExpired.status_code(), 401);
/// assert_eq!(SessionTokenError::NoTokenFound.status_code(), 400);
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionTokenError {
    /// The `Authorization` header is absent or is not a bearer token.
    #[error("no token found")]
    NoTokenFound,

    /// The token is malformed or its claims do not belong to this app and shop.
    #[error("session token is invalid: {reason}")]
    InvalidToken {
        /// Which check failed.
        reason: String,
    },

    /// The `exp` claim is missing or not in the future.
    #[error("session token has expired")]
    TokenExpired,

    /// The signature does not match under any configured secret.
    #[error("session token signature is invalid")]
    SignatureInvalid,
}

impl SessionTokenError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// The HTTP status a request boundary should respond with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NoTokenFound | Self::InvalidToken { .. } => 400,
            Self::TokenExpired | Self::SignatureInvalid => 401,
        }
    }
}

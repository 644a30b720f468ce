//! OAuth-specific error types.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::auth::oauth::OAuthError;
//!
//! let error = OAuthError::InvalidHmac;
//! assert_eq!(error.to_string(), "HMAC signature validation failed");
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur while verifying an OAuth callback or exchanging
/// its authorization code.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The callback's `hmac` parameter did not match under any configured secret.
    ///
    /// Also returned when the parameter is missing or is not valid hex.
    #[error("HMAC signature validation failed")]
    InvalidHmac,

    /// Callback parameters are missing or malformed.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },

    /// The access-token endpoint answered with a non-success status.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// Wrapped HTTP client error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ErrorDetails, HttpResponseError, InvalidHttpRequestError};

    #[test]
    fn test_token_exchange_failed_includes_status_and_message() {
        let error = OAuthError::TokenExchangeFailed {
            status: 401,
            message: "Invalid client credentials".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Invalid client credentials"));
    }

    #[test]
    fn test_invalid_callback_includes_reason() {
        let error = OAuthError::InvalidCallback {
            reason: "missing 'code' parameter".to_string(),
        };
        assert!(error.to_string().contains("missing 'code' parameter"));
    }

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 500,
            details: ErrorDetails::Message("Internal server error".to_string()),
            error_reference: None,
        });
        let oauth_error: OAuthError = http_error.into();
        assert!(matches!(oauth_error, OAuthError::Http(HttpError::Response(_))));

        let invalid = InvalidHttpRequestError::InvalidUrl {
            url: "::".to_string(),
        };
        let oauth_error: OAuthError = HttpError::InvalidRequest(invalid).into();
        assert!(matches!(
            oauth_error,
            OAuthError::Http(HttpError::InvalidRequest(_))
        ));
    }
}

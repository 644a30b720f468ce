//! Webhook error types.

use thiserror::Error;

/// Errors that can occur while handling an incoming webhook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// The `X-Shopify-Hmac-SHA256` header is missing or does not match the
    /// body under any configured secret.
    #[error("Webhook signature verification failed")]
    InvalidHmac,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hmac_error_message() {
        assert_eq!(
            WebhookError::InvalidHmac.to_string(),
            "Webhook signature verification failed"
        );
    }
}

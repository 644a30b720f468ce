//! Incoming webhook verification.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::webhooks::{verify_webhook, WebhookRequest};
//!
//! let request = WebhookRequest::from_headers(&headers, body_bytes);
//! match verify_webhook(&request, &app_config) {
//!     Ok(context) => dispatch(context.topic(), request.body()),
//!     Err(_) => respond(401),
//! }
//! ```

mod errors;
mod verification;

pub use errors::WebhookError;
pub use verification::{
    verify_hmac, verify_webhook, WebhookContext, WebhookRequest, HEADER_API_VERSION, HEADER_HMAC,
    HEADER_SHOP_DOMAIN, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};

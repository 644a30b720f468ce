//! Verification of requests that claim to come from the platform.
//!
//! Every check here is an HMAC-SHA256 comparison under the app's API secret
//! (see [`hmac`]), made with a message built differently per call site:
//!
//! - [`oauth`]: the install callback's query string, minus `hmac`
//! - [`session_token`]: the `header.payload` part of an embedded-app token
//! - [`crate::webhooks`]: the raw webhook body
//!
//! All of them accept [`AppConfig`](crate::AppConfig) and try the old secret
//! after the current one, so a secret can be rotated without rejecting
//! requests that are already in flight.

pub mod hmac;
pub mod oauth;
pub mod session_token;

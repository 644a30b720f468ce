//! REST Admin API engine.
//!
//! [`RestClient`] sends `METHOD {base}/admin/api/{version}/{path}.json` requests
//! and reacts to the call-bucket rate limit:
//!
//! - `429 Too Many Requests` is retried after `Retry-After` seconds, up to the
//!   configured attempt bound, then surfaces as
//!   [`HttpError::RateLimited`](crate::clients::HttpError::RateLimited).
//! - Any other status of 300 or above fails immediately with the decoded
//!   error payload.
//! - On success the `X-Shopify-Shop-Api-Call-Limit` header updates the shared
//!   [`RateLimitState`](crate::clients::RateLimitState). If fewer than
//!   `rest_threshold` slots remain, the engine waits `proactive_wait` before
//!   returning, so the next call starts with a refilled bucket.
//!
//! # Path Normalization
//!
//! - Leading slashes are stripped: `/products` -> `products.json`
//! - A trailing `.json` is stripped and re-added once
//! - An empty path is rejected with [`RestError::InvalidPath`]

mod client;
mod errors;

pub use client::{RestClient, RestResponse};
pub use errors::RestError;

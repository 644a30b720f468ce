//! GraphQL Admin API engine.
//!
//! [`GraphqlClient`] posts `{"query", "variables"}` to
//! `{base}/admin/api/{version}/graphql.json` and reacts to the cost-based
//! rate limit:
//!
//! - Throttling arrives as a `200` whose `errors` carry `extensions.code` of
//!   `THROTTLED` or `MAX_COST_EXCEEDED`. The engine waits `graphql_retry_wait`
//!   and retries, up to the configured attempt bound.
//! - Any other error surfaces its first message as [`GraphqlError::Query`].
//! - `extensions.cost.throttleStatus.currentlyAvailable` updates the shared
//!   [`RateLimitState`](crate::clients::RateLimitState). Below
//!   `graphql_threshold` points, the engine waits `proactive_wait` before
//!   returning `data`.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let data = client
//!     .graphql(
//!         "query($id: ID!) { product(id: $id) { title } }",
//!         Some(json!({"id": "gid://shopify/Product/1"})),
//!     )
//!     .await?;
//! println!("{}", data["product"]["title"]);
//! ```

mod client;
mod errors;

pub use client::{GraphqlClient, ThrottleStatus, THROTTLE_CODES};
pub use errors::GraphqlError;

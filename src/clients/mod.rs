//! Outbound Admin API clients.
//!
//! # Overview
//!
//! - [`Client`]: facade owning configuration, transport and rate-limit state
//! - [`rest::RestClient`]: REST engine with call-bucket throttling
//! - [`graphql::GraphqlClient`]: GraphQL engine with cost-based throttling
//! - [`HttpClient`]: single-attempt transport shared by both engines
//! - [`RateLimitState`]: the latest headroom reading, behind a mutex
//! - [`Pagination`]: cursors parsed from the REST `Link` header
//!
//! # Retry Behavior
//!
//! Only throttling is retried, and never more than `max_retries` attempts:
//!
//! - **REST 429**: waits `Retry-After` seconds (1 second if absent), then retries
//! - **GraphQL `THROTTLED` / `MAX_COST_EXCEEDED`**: waits 2 seconds, then retries
//! - **Everything else**: returned immediately

mod client;
mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod pagination;
mod rate_limit;
pub mod rest;

pub use client::{Client, ClientError};
pub use errors::{
    ErrorDetails, HttpError, HttpResponseError, InvalidHttpRequestError, RateLimitedError,
};
pub use http_client::{HttpClient, ACCESS_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};
pub use pagination::{Pagination, PaginationError};
pub use rate_limit::{RateLimitReading, RateLimitState, ThrottleModel};

pub use graphql::{GraphqlClient, GraphqlError};
pub use rest::{RestClient, RestError, RestResponse};

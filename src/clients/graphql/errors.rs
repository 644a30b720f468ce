//! GraphQL-specific error types.
//!
//! - [`GraphqlError::Query`]: the response carried a non-throttling error;
//!   holds the first error's message
//! - [`GraphqlError::MissingData`]: no errors and no `data`
//! - [`GraphqlError::Http`]: transport, throttling (`THROTTLED`,
//!   `MAX_COST_EXCEEDED` on every attempt) and non-200 statuses

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL Admin API calls.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The query failed with a non-throttling error. Never retried.
    #[error("GraphQL error: {message}")]
    Query {
        /// Message of the first reported error.
        message: String,
        /// `extensions.code` of that error, if any.
        code: Option<String>,
    },

    /// The response had neither `errors` nor `data`.
    #[error("GraphQL response contained no data")]
    MissingData,

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

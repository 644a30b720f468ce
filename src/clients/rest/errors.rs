//! REST-specific error types.
//!
//! - [`RestError::InvalidPath`]: the path is empty after normalization
//! - [`RestError::MalformedLinkHeader`]: the call succeeded but its `Link`
//!   header could not be parsed; the decoded body is carried along
//! - [`RestError::Http`]: transport, throttling and remote errors
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::rest::RestError;
//!
//! match client.get("products", None).await {
//!     Ok(response) => println!("Products: {}", response.body),
//!     Err(RestError::MalformedLinkHeader { body, .. }) => {
//!         println!("Products (no cursors): {}", body);
//!     }
//!     Err(e) => println!("{e}"),
//! }
//! ```

use crate::clients::pagination::PaginationError;
use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// The REST API path is invalid.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// The call succeeded but its pagination header is malformed.
    #[error("{error}")]
    MalformedLinkHeader {
        /// The parsing failure.
        #[source]
        error: PaginationError,
        /// The successfully decoded response body.
        body: serde_json::Value,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

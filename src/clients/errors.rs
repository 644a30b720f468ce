//! Transport-level error types shared by the REST and GraphQL engines.
//!
//! - [`HttpResponseError`]: the remote answered with a non-throttling error status
//! - [`RateLimitedError`]: every attempt was throttled
//! - [`InvalidHttpRequestError`]: the request failed validation before sending
//! - [`HttpError`]: unified error type covering the above plus network and
//!   body-decoding failures
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::HttpError;
//!
//! match client.get("products", None).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(RestError::Http(HttpError::Response(e))) => {
//!         println!("status {}: {}", e.code, e.details);
//!     }
//!     Err(RestError::Http(HttpError::RateLimited(e))) => {
//!         println!("throttled {} times, try again later", e.tries);
//!     }
//!     Err(e) => println!("{e}"),
//! }
//! ```

use crate::clients::http_response::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Error details decoded from a failed response body.
///
/// The Admin API reports errors in three shapes, resolved once at decode time:
///
/// - `{"errors": "Not Found"}` → [`ErrorDetails::Message`]
/// - `{"errors": ["a", "b"]}` → [`ErrorDetails::List`]
/// - `{"errors": {"title": ["can't be blank"]}}` → [`ErrorDetails::Fields`]
///
/// OAuth-style bodies (`{"error": .., "error_description": ..}`) and non-JSON
/// bodies become a [`ErrorDetails::Message`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// A single message.
    Message(String),
    /// A flat list of messages.
    List(Vec<String>),
    /// Field-level messages keyed by field name.
    Fields(Map<String, Value>),
}

impl ErrorDetails {
    /// Decodes the error payload of a failed response body.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(body) else {
            return Self::Message(body.trim().to_string());
        };

        if let Some(errors) = object.remove("errors") {
            return serde_json::from_value::<Self>(errors.clone())
                .unwrap_or_else(|_| Self::Message(errors.to_string()));
        }

        let error = object.get("error").and_then(Value::as_str);
        let description = object.get("error_description").and_then(Value::as_str);
        match (error, description) {
            (Some(error), Some(description)) => Self::Message(format!("{error}: {description}")),
            (Some(message), None) | (None, Some(message)) => Self::Message(message.to_string()),
            (None, None) => Self::Fields(object),
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::List(messages) => f.write_str(&messages.join(", ")),
            Self::Fields(fields) => {
                let mut first = true;
                for (field, messages) in fields {
                    if !first {
                        f.write_str("; ")?;
                    }
                    first = false;
                    match messages {
                        Value::Array(items) => {
                            let joined: Vec<String> = items
                                .iter()
                                .map(|m| m.as_str().map_or_else(|| m.to_string(), String::from))
                                .collect();
                            write!(f, "{field} {}", joined.join(", "))?;
                        }
                        Value::String(message) => write!(f, "{field} {message}")?,
                        other => write!(f, "{field} {other}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// The remote reported a non-throttling error status.
#[derive(Debug, Error)]
#[error("Shopify responded with status {code}: {details}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Decoded error payload.
    pub details: ErrorDetails,
    /// Value of the `X-Request-Id` header, for support requests.
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Builds the error for a failed response, decoding its body.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        Self {
            code: response.code,
            details: ErrorDetails::from_body(&response.body),
            error_reference: response.request_id().map(String::from),
        }
    }
}

/// Every attempt of a call was throttled.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Rate limited on all {tries} attempts. Retry later.")]
pub struct RateLimitedError {
    /// The number of attempts made.
    pub tries: u32,
}

/// A request failed validation before it was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request URL could not be built.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
    },
}

/// Unified error type for HTTP-level failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-throttling error status from the remote.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Throttled on every attempt.
    #[error(transparent)]
    RateLimited(#[from] RateLimitedError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, DNS, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response carried a body that is not valid JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === ErrorDetails decoding ===

    #[test]
    fn test_decodes_string_errors() {
        let details = ErrorDetails::from_body(r#"{"errors":"[API] Invalid API key or access token (unrecognized login or wrong password)"}"#);
        assert_eq!(
            details,
            ErrorDetails::Message(
                "[API] Invalid API key or access token (unrecognized login or wrong password)"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_decodes_list_errors() {
        let details = ErrorDetails::from_body(r#"{"errors":["first","second"]}"#);
        assert_eq!(
            details,
            ErrorDetails::List(vec!["first".to_string(), "second".to_string()])
        );
        assert_eq!(details.to_string(), "first, second");
    }

    #[test]
    fn test_decodes_field_errors() {
        let details = ErrorDetails::from_body(r#"{"errors":{"title":["can't be blank"]}}"#);
        let ErrorDetails::Fields(fields) = &details else {
            panic!("expected field errors, got {details:?}");
        };
        assert_eq!(fields["title"], json!(["can't be blank"]));
        assert_eq!(details.to_string(), "title can't be blank");
    }

    #[test]
    fn test_decodes_oauth_style_errors() {
        let details = ErrorDetails::from_body(
            r#"{"error":"invalid_request","error_description":"The code is invalid"}"#,
        );
        assert_eq!(
            details,
            ErrorDetails::Message("invalid_request: The code is invalid".to_string())
        );

        let details = ErrorDetails::from_body(r#"{"error":"Not Found"}"#);
        assert_eq!(details, ErrorDetails::Message("Not Found".to_string()));
    }

    #[test]
    fn test_non_json_body_becomes_message() {
        let details = ErrorDetails::from_body("<html>Bad Gateway</html>\n");
        assert_eq!(
            details,
            ErrorDetails::Message("<html>Bad Gateway</html>".to_string())
        );
    }

    #[test]
    fn test_mixed_list_falls_back_to_raw_json() {
        let details = ErrorDetails::from_body(r#"{"errors":[1,"two"]}"#);
        assert_eq!(details, ErrorDetails::Message(r#"[1,"two"]"#.to_string()));
    }

    // === Error messages ===

    #[test]
    fn test_http_response_error_message_includes_code_and_details() {
        let error = HttpResponseError {
            code: 404,
            details: ErrorDetails::Message("Not Found".to_string()),
            error_reference: Some("abc-123".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Shopify responded with status 404: Not Found"
        );
    }

    #[test]
    fn test_rate_limited_error_message() {
        let error = HttpError::from(RateLimitedError { tries: 2 });
        assert!(error.to_string().contains("all 2 attempts"));
    }

    #[test]
    fn test_missing_body_message() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }
}

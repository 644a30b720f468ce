//! GraphQL engine implementation.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError, RateLimitedError};
use crate::clients::graphql::GraphqlError;
use crate::clients::rate_limit::{RateLimitState, ThrottleModel};
use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::config::{ClientConfig, ThrottlePolicy};

/// Error codes that mark a GraphQL response as throttled.
pub const THROTTLE_CODES: [&str; 2] = ["MAX_COST_EXCEEDED", "THROTTLED"];

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
    #[serde(default)]
    extensions: Option<ResponseExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    #[serde(default)]
    message: String,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

impl GraphqlErrorEntry {
    fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }

    fn is_throttle(&self) -> bool {
        self.code().is_some_and(|code| THROTTLE_CODES.contains(&code))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseExtensions {
    #[serde(default)]
    cost: Option<QueryCost>,
}

#[derive(Debug, Deserialize)]
struct QueryCost {
    #[serde(default, rename = "throttleStatus")]
    throttle_status: Option<ThrottleStatus>,
}

/// The `extensions.cost.throttleStatus` object of a GraphQL response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleStatus {
    /// Cost points available right now.
    #[serde(default)]
    pub currently_available: Option<f64>,
    /// Bucket capacity in cost points.
    #[serde(default)]
    pub maximum_available: Option<f64>,
    /// Points restored per second.
    #[serde(default)]
    pub restore_rate: Option<f64>,
}

impl ThrottleStatus {
    /// `currently_available` as whole points, clamped to `u32`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn available_points(&self) -> Option<u32> {
        self.currently_available
            .filter(|points| points.is_finite())
            .map(|points| points.clamp(0.0, f64::from(u32::MAX)) as u32)
    }
}

/// GraphQL Admin API engine for one shop.
///
/// Shares its transport and [`RateLimitState`] with the REST engine when
/// created through [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http_client: Arc<HttpClient>,
    rate_limit: Arc<RateLimitState>,
    max_retries: u32,
    throttle: ThrottlePolicy,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates an engine over a shared transport and rate-limit state.
    #[must_use]
    pub fn new(
        http_client: Arc<HttpClient>,
        rate_limit: Arc<RateLimitState>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            http_client,
            rate_limit,
            max_retries: config.max_retries(),
            throttle: config.throttle().clone(),
        }
    }

    /// Executes a query or mutation and returns its `data` object.
    ///
    /// `variables` is omitted from the request body when `None`.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Query`] for the first non-throttling error
    /// - [`HttpError::RateLimited`] if every attempt was throttled
    /// - [`HttpError::Response`] for any status other than 200
    /// - [`HttpError::Network`] on transport failure
    /// - [`HttpError::InvalidBody`] if the body is not a GraphQL response
    /// - [`GraphqlError::MissingData`] if the response has no `data`
    pub async fn query(&self, query: &str, variables: Option<Value>) -> Result<Value, GraphqlError> {
        let mut body = serde_json::json!({ "query": query });
        if let Some(variables) = variables {
            body["variables"] = variables;
        }

        let request = HttpRequest::builder(HttpMethod::Post, "graphql.json")
            .body(body)
            .build()
            .map_err(HttpError::from)?;

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            let response = self.http_client.send(&request).await?;

            if response.code != 200 {
                return Err(HttpError::from(HttpResponseError::from_response(&response)).into());
            }

            let envelope: GraphqlEnvelope =
                serde_json::from_str(&response.body).map_err(HttpError::from)?;

            let errors = envelope.errors.unwrap_or_default();
            if errors.iter().any(GraphqlErrorEntry::is_throttle) {
                if tries >= self.max_retries {
                    tracing::warn!(tries, "GraphQL query throttled on every attempt");
                    return Err(HttpError::from(RateLimitedError { tries }).into());
                }
                tracing::warn!(
                    tries,
                    wait_ms = u64::try_from(self.throttle.graphql_retry_wait.as_millis())
                        .unwrap_or(u64::MAX),
                    "GraphQL query throttled, retrying after wait"
                );
                tokio::time::sleep(self.throttle.graphql_retry_wait).await;
                continue;
            }

            if let Some(first) = errors.first() {
                return Err(GraphqlError::Query {
                    message: first.message.clone(),
                    code: first.code().map(String::from),
                });
            }

            let available = envelope
                .extensions
                .and_then(|extensions| extensions.cost)
                .and_then(|cost| cost.throttle_status)
                .and_then(|status| status.available_points());
            let threshold = self.throttle.graphql_threshold;
            let low = match available {
                Some(available) => {
                    self.rate_limit
                        .record(ThrottleModel::CostBudget, available, threshold)
                }
                None => self.rate_limit.is_below(ThrottleModel::CostBudget, threshold),
            };
            if low {
                tracing::warn!(
                    threshold,
                    "GraphQL cost budget nearly exhausted, waiting before next call"
                );
                tokio::time::sleep(self.throttle.proactive_wait).await;
            }

            return match envelope.data {
                Some(data) if !data.is_null() => Ok(data),
                _ => Err(GraphqlError::MissingData),
            };
        }
    }
}

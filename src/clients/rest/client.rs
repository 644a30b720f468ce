//! REST engine implementation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::errors::{HttpError, HttpResponseError, RateLimitedError};
use crate::clients::pagination::Pagination;
use crate::clients::rate_limit::{RateLimitState, ThrottleModel};
use crate::clients::rest::RestError;
use crate::clients::{ApiCallLimit, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ClientConfig, ThrottlePolicy};

/// A successful REST response.
#[derive(Clone, Debug)]
pub struct RestResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body. An empty body decodes to `{}`.
    pub body: serde_json::Value,
    /// Cursors from the `Link` header. Empty when the header is absent.
    pub pagination: Pagination,
    /// Call-bucket reading, if the response carried one.
    pub api_call_limit: Option<ApiCallLimit>,
}

/// REST API engine for one shop.
///
/// Usually reached through [`Client`](crate::Client), which shares one
/// transport and one [`RateLimitState`] between this engine and the GraphQL
/// engine.
///
/// # Example
///
/// ```rust,ignore
/// let response = client.rest().get("products", None).await?;
/// if let Some(cursor) = &response.pagination.next {
///     let query = HashMap::from([("page_info".to_string(), cursor.clone())]);
///     let next_page = client.rest().get("products", Some(query)).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: Arc<HttpClient>,
    rate_limit: Arc<RateLimitState>,
    max_retries: u32,
    throttle: ThrottlePolicy,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
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

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`RestClient::call`].
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<RestResponse, RestError> {
        self.call(HttpMethod::Get, path, query, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::call`].
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<RestResponse, RestError> {
        self.call(HttpMethod::Post, path, None, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::call`].
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<RestResponse, RestError> {
        self.call(HttpMethod::Put, path, None, Some(body)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`RestClient::call`].
    pub async fn delete(&self, path: &str) -> Result<RestResponse, RestError> {
        self.call(HttpMethod::Delete, path, None, None).await
    }

    /// Sends a request, retrying throttled attempts.
    ///
    /// # Errors
    ///
    /// - [`RestError::InvalidPath`] if `path` is empty after normalization
    /// - [`HttpError::InvalidRequest`] for a POST or PUT without a body
    /// - [`HttpError::RateLimited`] if every attempt returned 429
    /// - [`HttpError::Response`] for any other status of 300 or above
    /// - [`HttpError::Network`] on transport failure
    /// - [`HttpError::InvalidBody`] if a successful body is not JSON
    /// - [`RestError::MalformedLinkHeader`] if the `Link` header is malformed
    pub async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<HashMap<String, String>>,
        body: Option<serde_json::Value>,
    ) -> Result<RestResponse, RestError> {
        let path = normalize_path(path)?;
        let request = HttpRequest::builder(method, path)
            .query(query.unwrap_or_default())
            .maybe_body(body)
            .build()
            .map_err(HttpError::from)?;

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            let response = self.http_client.send(&request).await?;

            if response.is_throttled() {
                if tries >= self.max_retries {
                    tracing::warn!(
                        path = %request.path,
                        tries,
                        "REST call rate limited on every attempt"
                    );
                    return Err(HttpError::from(RateLimitedError { tries }).into());
                }
                let wait = response
                    .retry_after
                    .unwrap_or(self.throttle.default_retry_after);
                tracing::warn!(
                    path = %request.path,
                    tries,
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    "REST call rate limited, retrying after wait"
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            if response.code >= 300 {
                return Err(HttpError::from(HttpResponseError::from_response(&response)).into());
            }

            let threshold = self.throttle.rest_threshold;
            let low = match response.api_call_limit {
                Some(limit) => {
                    self.rate_limit
                        .record(ThrottleModel::CallBucket, limit.available(), threshold)
                }
                None => self.rate_limit.is_below(ThrottleModel::CallBucket, threshold),
            };
            if low {
                tracing::warn!(
                    threshold,
                    "REST call bucket nearly exhausted, waiting before next call"
                );
                tokio::time::sleep(self.throttle.proactive_wait).await;
            }

            return into_rest_response(response);
        }
    }
}

fn into_rest_response(response: HttpResponse) -> Result<RestResponse, RestError> {
    let body = if response.body.trim().is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_str(&response.body).map_err(HttpError::from)?
    };

    let pagination = match response.link().map(Pagination::parse) {
        None => Pagination::default(),
        Some(Ok(pagination)) => pagination,
        Some(Err(error)) => return Err(RestError::MalformedLinkHeader { error, body }),
    };

    Ok(RestResponse {
        code: response.code,
        body,
        pagination,
        api_call_limit: response.api_call_limit,
        headers: response.headers,
    })
}

fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_start_matches('/');
    let trimmed = trimmed.strip_suffix(".json").unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(format!("{trimmed}.json"))
}

//! The [`Client`] facade.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::clients::graphql::{GraphqlClient, GraphqlError};
use crate::clients::rate_limit::{RateLimitReading, RateLimitState};
use crate::clients::rest::{RestClient, RestError, RestResponse};
use crate::clients::HttpClient;
use crate::config::{AccessToken, ClientConfig, ShopDomain};
use crate::error::ConfigError;

/// Errors that can occur while constructing a [`Client`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration values are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP transport could not be initialized.
    #[error("Failed to initialize HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Admin API client for one shop.
///
/// Owns the configuration, one HTTP transport and one rate-limit state, and
/// shares them between its REST and GraphQL engines. Cloning is cheap and
/// clones share all three.
///
/// # Example
///
/// ```rust,no_run
/// use shopify_admin::Client;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::with_token("my-store", "shpat_123")?;
///
/// let products = client.get("products", None).await?;
/// println!("{}", products.body);
///
/// let data = client.graphql("{ shop { name } }", None).await?;
/// println!("{}", data["shop"]["name"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    rate_limit: Arc<RateLimitState>,
    rest: RestClient,
    graphql: GraphqlClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client from a built configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = Arc::new(HttpClient::new(&config)?);
        let rate_limit = Arc::new(RateLimitState::new());

        let rest = RestClient::new(Arc::clone(&http_client), Arc::clone(&rate_limit), &config);
        let graphql =
            GraphqlClient::new(Arc::clone(&http_client), Arc::clone(&rate_limit), &config);

        tracing::debug!(
            shop = %config.shop(),
            api_version = %config.api_version(),
            max_retries = config.max_retries(),
            "Admin API client created"
        );

        Ok(Self {
            config: Arc::new(config),
            rate_limit,
            rest,
            graphql,
        })
    }

    /// Creates a client with default options from a shop domain and token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the domain or token is invalid and
    /// [`ClientError::Transport`] if the transport cannot be initialized.
    pub fn with_token(shop: &str, access_token: &str) -> Result<Self, ClientError> {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new(shop)?)
            .access_token(AccessToken::new(access_token)?)
            .build()?;
        Self::new(config)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the REST engine.
    #[must_use]
    pub const fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Returns the GraphQL engine.
    #[must_use]
    pub const fn graphql_client(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Returns the most recent rate-limit reading from either engine.
    #[must_use]
    pub fn available_calls(&self) -> Option<RateLimitReading> {
        self.rate_limit.current()
    }

    /// Sends a REST GET request. See [`RestClient::call`] for errors.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] on failure.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<RestResponse, RestError> {
        self.rest.get(path, query).await
    }

    /// Sends a REST POST request. See [`RestClient::call`] for errors.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] on failure.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<RestResponse, RestError> {
        self.rest.post(path, body).await
    }

    /// Sends a REST PUT request. See [`RestClient::call`] for errors.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] on failure.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<RestResponse, RestError> {
        self.rest.put(path, body).await
    }

    /// Sends a REST DELETE request. See [`RestClient::call`] for errors.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] on failure.
    pub async fn delete(&self, path: &str) -> Result<RestResponse, RestError> {
        self.rest.delete(path).await
    }

    /// Executes a GraphQL query. See [`GraphqlClient::query`] for errors.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError`] on failure.
    pub async fn graphql(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, GraphqlError> {
        self.graphql.query(query, variables).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token_validates_inputs() {
        assert!(matches!(
            Client::with_token("not a shop", "token"),
            Err(ClientError::Config(ConfigError::InvalidShopDomain { .. }))
        ));
        assert!(matches!(
            Client::with_token("my-store", ""),
            Err(ClientError::Config(ConfigError::EmptyAccessToken))
        ));
    }

    #[test]
    fn test_new_client_has_no_rate_limit_reading() {
        let client = Client::with_token("my-store", "shpat_123").unwrap();
        assert!(client.available_calls().is_none());
        assert_eq!(client.config().shop().as_ref(), "my-store.myshopify.com");
    }

    #[test]
    fn test_clones_share_rate_limit_state() {
        let client = Client::with_token("my-store", "shpat_123").unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.rate_limit, &clone.rate_limit));
    }
}

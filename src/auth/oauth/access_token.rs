//! Authorization-code exchange.

use serde::{Deserialize, Serialize};

use crate::auth::oauth::OAuthError;
use crate::clients::{ErrorDetails, HttpError};
use crate::config::{AppConfig, ShopDomain};

/// Request body for the authorization-code exchange.
#[derive(Serialize)]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// A successful access-token exchange.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccessTokenResponse {
    /// The offline Admin API access token.
    pub access_token: String,
    /// The comma-separated scopes that were granted.
    #[serde(default)]
    pub scope: String,
}

/// Exchanges an authorization code for an access token.
///
/// Verify the callback with
/// [`verify_auth_callback`](super::verify_auth_callback) first; this function
/// trusts `shop` and `code` as given.
///
/// # Errors
///
/// - [`OAuthError::TokenExchangeFailed`] when the endpoint answers with a
///   non-success status
/// - [`OAuthError::Http`] on network failure or an undecodable success body
pub async fn exchange_access_token(
    config: &AppConfig,
    shop: &ShopDomain,
    code: &str,
) -> Result<AccessTokenResponse, OAuthError> {
    exchange_access_token_at(config, &format!("https://{shop}"), code).await
}

pub(crate) async fn exchange_access_token_at(
    config: &AppConfig,
    base_uri: &str,
    code: &str,
) -> Result<AccessTokenResponse, OAuthError> {
    let token_url = format!("{base_uri}/admin/oauth/access_token");
    let request_body = AccessTokenRequest {
        client_id: config.api_key().as_ref(),
        client_secret: config.api_secret_key().as_ref(),
        code,
    };

    tracing::debug!(url = %token_url, "Exchanging authorization code");

    // Unauthenticated, so it does not go through a configured HttpClient.
    let response = reqwest::Client::new()
        .post(&token_url)
        .json(&request_body)
        .send()
        .await
        .map_err(HttpError::Network)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(HttpError::Network)?;

    if !(200..300).contains(&status) {
        return Err(OAuthError::TokenExchangeFailed {
            status,
            message: ErrorDetails::from_body(&body).to_string(),
        });
    }

    serde_json::from_str(&body)
        .map_err(HttpError::InvalidBody)
        .map_err(OAuthError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("test-api-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_exchange_posts_credentials_and_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .and(body_json(json!({
                "client_id": "test-api-key",
                "client_secret": "test-secret",
                "code": "auth-code"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "shpat_abc",
                "scope": "read_products,write_orders"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = exchange_access_token_at(&config(), &server.uri(), "auth-code")
            .await
            .unwrap();
        assert_eq!(token.access_token, "shpat_abc");
        assert_eq!(token.scope, "read_products,write_orders");
    }

    #[tokio::test]
    async fn test_exchange_failure_carries_status_and_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_request",
                "error_description": "The authorization code was not found or was already used"
            })))
            .mount(&server)
            .await;

        match exchange_access_token_at(&config(), &server.uri(), "used-code").await {
            Err(OAuthError::TokenExchangeFailed { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("invalid_request"));
                assert!(message.contains("already used"));
            }
            other => panic!("Expected TokenExchangeFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exchange_rejects_undecodable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = exchange_access_token_at(&config(), &server.uri(), "code").await;
        assert!(matches!(
            result,
            Err(OAuthError::Http(HttpError::InvalidBody(_)))
        ));
    }
}

//! Decoding and validation of session tokens.

use std::sync::LazyLock;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{crypto, decode, decode_header, Algorithm, DecodingKey, Validation};
use regex::Regex;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use url::Url;

use crate::auth::session_token::{Payload, SessionTokenError};
use crate::config::{ApiKey, ApiSecretKey, AppConfig};

static SHOP_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]*\.myshopify\.com$").expect("Invalid regex")
});

const BEARER_PREFIX: &str = "bearer ";

/// The only signing algorithm the platform uses for session tokens.
const EXPECTED_ALG: Algorithm = Algorithm::HS256;

fn malformed(error: &jsonwebtoken::errors::Error) -> SessionTokenError {
    SessionTokenError::invalid(format!("malformed token: {error}"))
}

/// Splits a token into `header.payload` and the signature segment.
fn split_signature(token: &str) -> Result<(&str, &str), SessionTokenError> {
    token
        .rsplit_once('.')
        .filter(|(message, _)| message.split('.').count() == 2)
        .ok_or_else(|| SessionTokenError::invalid("token must have exactly three segments"))
}

/// Extracts the token from an `Authorization: Bearer <token>` value.
///
/// The scheme is matched case-insensitively.
///
/// # Errors
///
/// Returns [`SessionTokenError::NoTokenFound`] if the value is absent, uses
/// another scheme, or carries no token.
///
/// ```rust
/// use shopify_admin::auth::session_token::token_from_authorization;
///
/// assert_eq!(token_from_authorization(Some("BEARER abc.def.ghi")).unwrap(), "abc.def.ghi");
/// assert!(token_from_authorization(Some("Basic dXNlcjpwYXNz")).is_err());
/// assert!(token_from_authorization(None).is_err());
/// ```
pub fn token_from_authorization(value: Option<&str>) -> Result<&str, SessionTokenError> {
    let value = value.ok_or(SessionTokenError::NoTokenFound)?;
    let scheme = value
        .get(..BEARER_PREFIX.len())
        .ok_or(SessionTokenError::NoTokenFound)?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(SessionTokenError::NoTokenFound);
    }
    let token = value[BEARER_PREFIX.len()..].trim();
    if token.is_empty() {
        return Err(SessionTokenError::NoTokenFound);
    }
    Ok(token)
}

/// Extracts the bearer token from a request's headers.
///
/// # Errors
///
/// Returns [`SessionTokenError::NoTokenFound`] if there is no usable
/// `Authorization` header.
pub fn token_from_headers(headers: &HeaderMap) -> Result<&str, SessionTokenError> {
    token_from_authorization(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()))
}

/// Decodes a token and checks its claims, without checking the signature.
///
/// A payload returned from here is not yet authentic. Use [`validate`] or
/// [`validate_session_token`] to get one that is.
///
/// # Errors
///
/// - [`SessionTokenError::InvalidToken`] for a malformed token or a failed
///   `nbf`, `iat`, `aud`, `iss` or `dest` check
/// - [`SessionTokenError::TokenExpired`] if `exp` is missing or not in the future
pub fn decode_session_token(token: &str, api_key: &ApiKey) -> Result<Payload, SessionTokenError> {
    let payload = decode_payload(token)?;
    check_claims(&payload, api_key, chrono::Utc::now().timestamp())?;
    Ok(payload)
}

/// Checks a token's HMAC-SHA256 signature over `header.payload`.
///
/// Each secret is tried in turn; the comparison is constant time.
///
/// # Errors
///
/// - [`SessionTokenError::InvalidToken`] if the token does not have three
///   segments or the signature segment is not base64url
/// - [`SessionTokenError::SignatureInvalid`] if no secret produces the signature
pub fn verify_token_signature<'a>(
    token: &str,
    secrets: impl IntoIterator<Item = &'a ApiSecretKey>,
) -> Result<(), SessionTokenError> {
    let (message, signature) = split_signature(token)?;
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| SessionTokenError::invalid("signature is not base64url"))?;

    let verified = secrets.into_iter().any(|secret| {
        let key = DecodingKey::from_secret(secret.as_ref().as_bytes());
        crypto::verify(signature, message.as_bytes(), &key, EXPECTED_ALG).unwrap_or(false)
    });
    if verified {
        Ok(())
    } else {
        Err(SessionTokenError::SignatureInvalid)
    }
}

/// Fully validates a session token: structure, then claims, then signature.
///
/// Claims are checked before the signature, so a claim failure says nothing
/// about whether the signature would have verified.
///
/// # Errors
///
/// See [`decode_session_token`] and [`verify_token_signature`].
pub fn validate<'a>(
    token: &str,
    api_key: &ApiKey,
    secrets: impl IntoIterator<Item = &'a ApiSecretKey>,
) -> Result<Payload, SessionTokenError> {
    let result = decode_session_token(token, api_key)
        .and_then(|payload| verify_token_signature(token, secrets).map(|()| payload));

    if let Err(error) = &result {
        tracing::warn!(%error, "Session token rejected");
    }
    result
}

/// Validates a session token against an app's key and secrets, including
/// `old_api_secret_key` during a rotation.
///
/// # Errors
///
/// See [`validate`].
pub fn validate_session_token(token: &str, config: &AppConfig) -> Result<Payload, SessionTokenError> {
    validate(token, config.api_key(), config.secrets())
}

/// Extracts and validates the bearer token of an incoming request.
///
/// On success the decoded claims are returned for downstream handlers; the
/// raw token is not kept.
///
/// # Errors
///
/// [`SessionTokenError::NoTokenFound`] if there is no bearer token, otherwise
/// see [`validate`].
pub fn verify_session_request(
    headers: &HeaderMap,
    config: &AppConfig,
) -> Result<Payload, SessionTokenError> {
    let token = token_from_headers(headers)?;
    validate_session_token(token, config)
}

fn decode_payload(token: &str) -> Result<Payload, SessionTokenError> {
    let header = decode_header(token).map_err(|e| malformed(&e))?;
    if header.alg != EXPECTED_ALG {
        return Err(SessionTokenError::invalid(format!(
            "unsupported algorithm '{:?}'",
            header.alg
        )));
    }

    // Signature is checked separately, after the claims.
    let mut validation = Validation::new(EXPECTED_ALG);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Payload>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| malformed(&e))?;
    Ok(data.claims)
}

fn check_claims(payload: &Payload, api_key: &ApiKey, now: i64) -> Result<(), SessionTokenError> {
    if payload.exp == 0 || payload.exp <= now {
        return Err(SessionTokenError::TokenExpired);
    }
    if payload.nbf == 0 || payload.nbf > now {
        return Err(SessionTokenError::invalid("token is not yet valid"));
    }
    if payload.iat == 0 || payload.iat > now {
        return Err(SessionTokenError::invalid("token was issued in the future"));
    }
    if payload.aud != api_key.as_ref() {
        return Err(SessionTokenError::invalid("audience does not match API key"));
    }
    check_shop(payload)
}

fn check_shop(payload: &Payload) -> Result<(), SessionTokenError> {
    let host = |claim: &str, value: &str| {
        Url::parse(value)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
            .ok_or_else(|| SessionTokenError::invalid(format!("'{claim}' is not a URL")))
    };

    let iss = host("iss", &payload.iss)?;
    let dest = host("dest", &payload.dest)?;
    if iss != dest {
        return Err(SessionTokenError::invalid("'iss' and 'dest' hosts differ"));
    }
    if !SHOP_HOST_RE.is_match(&dest) {
        return Err(SessionTokenError::invalid("'dest' is not a shop domain"));
    }
    Ok(())
}

//! HMAC-SHA256 signing and verification.
//!
//! One primitive, three call sites:
//!
//! - OAuth callbacks: hex-encoded MAC over the re-encoded query string
//! - Webhooks: base64 of the hex-encoded MAC over the raw body
//! - Session tokens: base64url MAC over `header.payload`
//!
//! # Security
//!
//! Every comparison is constant time. [`verify`] recomputes the MAC and
//! compares it with [`Mac::verify_slice`], which does not short-circuit on the
//! first differing byte. Verification is pure: the same inputs always yield
//! the same answer.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::auth::hmac::{compute_signature, compute_webhook_signature, verify};
//!
//! let hex = compute_signature(b"message", "key");
//! assert_eq!(hex, "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a");
//!
//! let header = compute_webhook_signature(b"webhook request body", "hush");
//! assert!(header.ends_with("=="));
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::ApiSecretKey;

type HmacSha256 = Hmac<Sha256>;

// HMAC accepts any key size, so this never panics.
fn keyed(secret: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size")
}

/// Computes the raw HMAC-SHA256 digest of `message`.
#[must_use]
pub fn sign(secret: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = keyed(secret);
    mac.update(message);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// Computes a lowercase hex-encoded signature, as used by OAuth callbacks.
#[must_use]
pub fn compute_signature(message: &[u8], secret: &str) -> String {
    hex::encode(sign(secret.as_bytes(), message))
}

/// Computes the `X-Shopify-Hmac-SHA256` value for a webhook body: the
/// hex-encoded digest, base64-encoded.
#[must_use]
pub fn compute_webhook_signature(body: &[u8], secret: &str) -> String {
    STANDARD.encode(compute_signature(body, secret))
}

/// Verifies `provided_mac` (raw digest bytes) against `message` in constant time.
#[must_use]
pub fn verify(secret: &[u8], message: &[u8], provided_mac: &[u8]) -> bool {
    let mut mac = keyed(secret);
    mac.update(message);
    mac.verify_slice(provided_mac).is_ok()
}

/// Verifies against each secret in turn, current secret first.
#[must_use]
pub fn verify_any<'a>(
    secrets: impl IntoIterator<Item = &'a ApiSecretKey>,
    message: &[u8],
    provided_mac: &[u8],
) -> bool {
    secrets
        .into_iter()
        .any(|secret| verify(secret.as_ref().as_bytes(), message, provided_mac))
}

/// Constant-time byte comparison. Unequal lengths compare unequal.
#[must_use]
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

pub(crate) mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }

    /// Decodes hex of either case. `None` on odd length or a non-hex digit.
    pub fn decode(hex: &str) -> Option<Vec<u8>> {
        let hex = hex.as_bytes();
        if hex.len() % 2 != 0 {
            return None;
        }
        hex.chunks_exact(2)
            .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
            .collect()
    }

    const fn nibble(c: u8) -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    }
}

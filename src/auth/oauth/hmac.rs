//! HMAC-SHA256 signing for OAuth callback verification.
//!
//! Shopify signs every OAuth callback with the app's shared secret. The
//! signature covers all callback parameters except `hmac` itself, encoded by
//! [`AuthQuery::to_signable_string`].
//!
//! All comparisons are constant-time.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::oauth::hmac::{compute_signature, constant_time_compare};
//!
//! let signature = compute_signature("code=abc&shop=foo.myshopify.com", "my-secret");
//! assert_eq!(signature.len(), 64);
//! assert!(constant_time_compare(&signature, &signature.clone()));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::auth::oauth::AuthQuery;
use crate::config::ApiSecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Computes the lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::oauth::hmac::compute_signature;
///
/// assert_eq!(
///     compute_signature("message", "key"),
///     "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
/// );
/// ```
#[must_use]
pub fn compute_signature(message: &str, secret: &str) -> String {
    // HMAC takes keys of any length; an empty signature never matches.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two strings without short-circuiting on the first difference.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Validates a callback signature.
///
/// Recomputes the signature over `query` (minus any `hmac` entry) with
/// `secret`, then with `old_secret` if one is given, and compares each
/// against `hmac`.
#[must_use]
pub fn validate_hmac(
    query: &AuthQuery,
    hmac: &str,
    secret: &ApiSecretKey,
    old_secret: Option<&ApiSecretKey>,
) -> bool {
    let signable = query.to_signable_string();

    std::iter::once(secret)
        .chain(old_secret)
        .any(|key| constant_time_compare(&compute_signature(&signable, key.as_ref()), hmac))
}

mod hex {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callback_query() -> AuthQuery {
        AuthQuery::new()
            .with("code", "0907a61c0c8d55e99db179b68161bc00")
            .with("shop", "some-shop.myshopify.com")
            .with("state", "0.6784241404160823")
            .with("timestamp", "1337178173")
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        assert_eq!(
            compute_signature("message", "key"),
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_is_lowercase_hex() {
        let sig = compute_signature("", "secret");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(!constant_time_compare("ABC", "abc"));
    }

    #[test]
    fn test_validate_hmac_accepts_correct_signature() {
        let secret = ApiSecretKey::new("hush").unwrap();
        let query = callback_query();
        let hmac = compute_signature(&query.to_signable_string(), "hush");

        assert!(validate_hmac(&query, &hmac, &secret, None));
    }

    #[test]
    fn test_validate_hmac_ignores_hmac_entry_in_query() {
        let secret = ApiSecretKey::new("hush").unwrap();
        let hmac = compute_signature(&callback_query().to_signable_string(), "hush");
        let query = callback_query().with("hmac", hmac.clone());

        assert!(validate_hmac(&query, &hmac, &secret, None));
    }

    #[test]
    fn test_validate_hmac_rejects_tampered_params() {
        let secret = ApiSecretKey::new("hush").unwrap();
        let hmac = compute_signature(&callback_query().to_signable_string(), "hush");
        let tampered = callback_query().with("shop", "evil-shop.myshopify.com");

        assert!(!validate_hmac(&tampered, &hmac, &secret, None));
    }

    #[test]
    fn test_validate_hmac_falls_back_to_old_secret() {
        let secret = ApiSecretKey::new("new-secret").unwrap();
        let old = ApiSecretKey::new("old-secret").unwrap();
        let query = callback_query();
        let hmac = compute_signature(&query.to_signable_string(), "old-secret");

        assert!(!validate_hmac(&query, &hmac, &secret, None));
        assert!(validate_hmac(&query, &hmac, &secret, Some(&old)));
    }

    #[test]
    fn test_validate_hmac_fails_when_both_secrets_fail() {
        let secret = ApiSecretKey::new("secret-1").unwrap();
        let old = ApiSecretKey::new("secret-2").unwrap();
        let query = callback_query();
        let hmac = compute_signature(&query.to_signable_string(), "secret-3");

        assert!(!validate_hmac(&query, &hmac, &secret, Some(&old)));
    }
}

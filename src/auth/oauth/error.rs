//! OAuth callback validation errors.

use thiserror::Error;

/// Reasons an OAuth callback fails validation.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::oauth::AuthValidationError;
///
/// let error = AuthValidationError::InvalidHmac;
/// assert_eq!(error.to_string(), "Hmac validation failed");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// The callback's `state` differs from the one stored on the client.
    ///
    /// `expected` is `None` when no state was ever stored. It is kept out of
    /// the display text so the stored nonce is never echoed back.
    #[error("State value ('{received}') doesn't match the state stored for this authorization")]
    StateMismatch {
        /// The state stored when the authorize URL was built.
        expected: Option<String>,
        /// The state received in the callback.
        received: String,
    },

    /// The callback's HMAC signature does not match.
    #[error("Hmac validation failed")]
    InvalidHmac,
}

// Verify AuthValidationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_mismatch_does_not_reveal_stored_state() {
        let error = AuthValidationError::StateMismatch {
            expected: Some("bar".to_string()),
            received: "foo".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'foo'"));
        assert!(!message.contains("bar"));
    }

    #[test]
    fn test_state_mismatch_without_stored_state() {
        let error = AuthValidationError::StateMismatch {
            expected: None,
            received: "foo".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "State value ('foo') doesn't match the state stored for this authorization"
        );
    }
}

//! Anti-forgery state tokens.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// The `state` value carried through an OAuth redirect.
///
/// A public client stores the state it put on the authorize URL and
/// requires the callback to echo it back unchanged.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::oauth::StateParam;
///
/// let state = StateParam::new();
/// assert_eq!(state.nonce().len(), 15);
///
/// let supplied = StateParam::from_raw("my-nonce");
/// assert_eq!(supplied.as_ref(), "my-nonce");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct StateParam(String);

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Generates a random 15-character alphanumeric nonce.
    #[must_use]
    pub fn new() -> Self {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self(nonce)
    }

    /// Wraps a caller-supplied state value as-is.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the state value.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.0
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateParam").field(&self.0).finish()
    }
}

impl From<&str> for StateParam {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl From<String> for StateParam {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

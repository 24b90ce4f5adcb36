//! OAuth callback parameters.

use std::collections::BTreeMap;

/// The query parameters Shopify sends to an app's OAuth redirect URL.
///
/// Keys are unique and kept in sorted order, which is also the order used
/// for the signable string.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::oauth::AuthQuery;
///
/// let query = AuthQuery::parse("code=abc&shop=foo.myshopify.com&state=s1&hmac=deadbeef");
/// assert_eq!(query.code(), Some("abc"));
/// assert_eq!(query.to_signable_string(), "code=abc&shop=foo.myshopify.com&state=s1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthQuery {
    params: BTreeMap<String, String>,
}

impl AuthQuery {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, with or without a leading `?`.
    ///
    /// Keys and values are percent-decoded and `+` is read as a space.
    /// Pairs that fail to decode are kept verbatim. For repeated keys the
    /// last value wins.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (form_decode(key), form_decode(value))
            })
            .collect()
    }

    /// Sets a parameter, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the authorization code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.get("code")
    }

    /// Returns the HMAC signature.
    #[must_use]
    pub fn hmac(&self) -> Option<&str> {
        self.get("hmac")
    }

    /// Returns the anti-forgery state.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.get("state")
    }

    /// Returns the string the callback's HMAC is computed over.
    ///
    /// Every parameter except `hmac`, in sorted key order, form-urlencoded
    /// and joined with `&`.
    #[must_use]
    pub fn to_signable_string(&self) -> String {
        self.params
            .iter()
            .filter(|(key, _)| key.as_str() != "hmac")
            .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AuthQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Percent-encodes like an HTML form: unreserved characters pass through and
/// spaces become `+`.
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

fn form_decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| value.to_string(), |s| s.into_owned())
}

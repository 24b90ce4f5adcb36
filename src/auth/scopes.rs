//! OAuth scope handling.

use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A set of OAuth access scopes.
///
/// Parsed from a comma-separated list; whitespace around entries is ignored,
/// duplicates collapse, and the set displays in sorted order.
///
/// # Example
///
/// ```rust
/// use shopify_client::AuthScopes;
///
/// let scopes: AuthScopes = "read_products, write_orders,read_products".parse().unwrap();
/// assert_eq!(scopes.to_string(), "read_products,write_orders");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: BTreeSet<String>,
}

impl AuthScopes {
    /// Scopes requested when an authorize URL is built without any.
    pub const DEFAULT: &'static str = "read_products,read_orders";

    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scopes requested by default.
    #[must_use]
    pub fn baseline() -> Self {
        Self::DEFAULT
            .split(',')
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns `true` if this set contains every scope in `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.scopes.is_subset(&self.scopes)
    }

    /// Returns an iterator over the scopes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }
}

impl From<BTreeSet<String>> for AuthScopes {
    fn from(scopes: BTreeSet<String>) -> Self {
        Self { scopes }
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = BTreeSet::new();

        for scope in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }
            scopes.insert(scope.to_string());
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(",");
        f.write_str(&joined)
    }
}

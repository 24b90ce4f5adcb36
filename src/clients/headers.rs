//! Request header sets for REST and GraphQL calls.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::ApiFlavor;

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Admin API access token header.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
/// Storefront API access token header.
pub const STOREFRONT_ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";
/// Asks the platform to report query cost in GraphQL responses.
pub const GRAPHQL_COST_HEADER: &str = "X-GraphQL-Cost-Include-Fields";

const JSON_CONTENT_TYPE: &str = "application/json";
const GRAPHQL_CONTENT_TYPE: &str = "application/graphql";

/// An ordered header mapping.
///
/// Token-bearing values are masked in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: BTreeMap<&'static str, String>,
}

impl HeaderSet {
    /// Returns the value of `name`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.insert(name, value.into());
    }
}

impl fmt::Debug for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.entries {
            if name.ends_with("Access-Token") {
                map.entry(name, &"*****");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

/// The two header sets a client attaches to its requests.
///
/// Rebuild with [`ClientHeaders::build`] whenever the access token changes.
/// Building is deterministic: the same inputs always produce equal sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientHeaders {
    rest: HeaderSet,
    graphql: HeaderSet,
}

impl ClientHeaders {
    /// Builds both header sets.
    ///
    /// REST calls always use the Admin API token header; GraphQL calls use
    /// the header matching `flavor`. A `None` token omits the token header.
    #[must_use]
    pub fn build(flavor: ApiFlavor, rest_token: Option<&str>, graphql_token: Option<&str>) -> Self {
        let mut rest = HeaderSet::default();
        rest.insert(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(token) = rest_token {
            rest.insert(ACCESS_TOKEN_HEADER, token);
        }

        let mut graphql = HeaderSet::default();
        graphql.insert(CONTENT_TYPE, GRAPHQL_CONTENT_TYPE);
        graphql.insert(GRAPHQL_COST_HEADER, "true");
        if let Some(token) = graphql_token {
            let name = match flavor {
                ApiFlavor::Admin => ACCESS_TOKEN_HEADER,
                ApiFlavor::Storefront => STOREFRONT_ACCESS_TOKEN_HEADER,
            };
            graphql.insert(name, token);
        }

        Self { rest, graphql }
    }

    /// Headers for REST calls.
    #[must_use]
    pub const fn rest(&self) -> &HeaderSet {
        &self.rest
    }

    /// Headers for GraphQL calls.
    #[must_use]
    pub const fn graphql(&self) -> &HeaderSet {
        &self.graphql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_headers_with_token() {
        let headers = ClientHeaders::build(ApiFlavor::Admin, Some("tok"), Some("tok"));
        assert_eq!(headers.rest().get("content-type"), Some("application/json"));
        assert_eq!(headers.rest().get(ACCESS_TOKEN_HEADER), Some("tok"));
        assert_eq!(headers.rest().len(), 2);
    }

    #[test]
    fn test_rest_headers_without_token_only_carry_content_type() {
        let headers = ClientHeaders::build(ApiFlavor::Admin, None, Some("password"));
        assert_eq!(headers.rest().len(), 1);
        assert!(headers.rest().get(ACCESS_TOKEN_HEADER).is_none());
    }

    #[test]
    fn test_admin_graphql_headers() {
        let headers = ClientHeaders::build(ApiFlavor::Admin, None, Some("tok"));
        let graphql = headers.graphql();
        assert_eq!(graphql.get(CONTENT_TYPE), Some("application/graphql"));
        assert_eq!(graphql.get(GRAPHQL_COST_HEADER), Some("true"));
        assert_eq!(graphql.get(ACCESS_TOKEN_HEADER), Some("tok"));
        assert!(graphql.get(STOREFRONT_ACCESS_TOKEN_HEADER).is_none());
    }

    #[test]
    fn test_storefront_graphql_headers_use_storefront_token_header() {
        let headers = ClientHeaders::build(ApiFlavor::Storefront, None, Some("sf-token"));
        let graphql = headers.graphql();
        assert_eq!(graphql.get(STOREFRONT_ACCESS_TOKEN_HEADER), Some("sf-token"));
        assert!(graphql.get(ACCESS_TOKEN_HEADER).is_none());
    }

    #[test]
    fn test_building_twice_yields_identical_sets() {
        let first = ClientHeaders::build(ApiFlavor::Admin, Some("tok"), Some("tok"));
        let second = ClientHeaders::build(ApiFlavor::Admin, Some("tok"), Some("tok"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_debug_masks_tokens() {
        let headers = ClientHeaders::build(ApiFlavor::Storefront, Some("secret-a"), Some("secret-b"));
        let debug = format!("{headers:?}");
        assert!(!debug.contains("secret-a"));
        assert!(!debug.contains("secret-b"));
        assert!(debug.contains("*****"));
    }
}

//! Endpoint URL templates.
//!
//! Templates are plain strings with `{name}` placeholders. [`render`] fills
//! them in a single left-to-right pass: substituted values are never
//! rescanned, and placeholders without a value are left untouched.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::clients::url::{render, Placeholder, REST_PUBLIC};
//!
//! let url = render(
//!     REST_PUBLIC,
//!     &[
//!         (Placeholder::ShopifyDomain, "foo.myshopify.com"),
//!         (Placeholder::Version, "2021-07"),
//!         (Placeholder::Resource, "products"),
//!     ],
//! );
//! assert_eq!(url, "https://foo.myshopify.com/admin/api/2021-07/products.json");
//! ```

use crate::config::{ApiFlavor, ClientConfig, Credentials};

/// REST endpoint for public apps, authenticated by header.
pub const REST_PUBLIC: &str = "https://{shopify_domain}/admin/api/{version}/{resource}.json";

/// REST endpoint for private apps, authenticated by URL userinfo.
pub const REST_PRIVATE: &str =
    "https://{api_key}:{password}@{shopify_domain}/admin/api/{version}/{resource}.json";

/// Admin API GraphQL endpoint.
pub const GRAPHQL_ADMIN: &str = "https://{shopify_domain}/admin/api/{version}/graphql.json";

/// Storefront API GraphQL endpoint.
pub const GRAPHQL_STOREFRONT: &str = "https://{shopify_domain}/api/{version}/graphql.json";

/// OAuth authorize endpoint.
pub const OAUTH_AUTHORIZE: &str = "https://{shopify_domain}/admin/oauth/authorize";

/// OAuth code-for-token exchange endpoint.
pub const OAUTH_ACCESS_TOKEN: &str = "https://{shopify_domain}/admin/oauth/access_token";

/// Resource served from the OAuth path rather than the versioned REST path.
pub const ACCESS_SCOPES_RESOURCE: &str = "access_scopes";

/// A named slot in a URL template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{shopify_domain}`
    ShopifyDomain,
    /// `{version}`
    Version,
    /// `{resource}`
    Resource,
    /// `{api_key}`
    ApiKey,
    /// `{password}`
    Password,
}

impl Placeholder {
    /// Returns the name between the braces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShopifyDomain => "shopify_domain",
            Self::Version => "version",
            Self::Resource => "resource",
            Self::ApiKey => "api_key",
            Self::Password => "password",
        }
    }
}

/// Substitutes placeholder values into `template`.
#[must_use]
pub fn render(template: &str, values: &[(Placeholder, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];
        let Some(close) = candidate.find('}') else {
            out.push_str(candidate);
            return out;
        };

        let name = &candidate[1..close];
        match values.iter().find(|(p, _)| p.name() == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&candidate[..=close]),
        }
        rest = &candidate[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Derives the OAuth-path variant of a versioned template.
///
/// `.../admin/api/{version}/x.json` becomes `.../admin/oauth/x.json`.
#[must_use]
pub fn oauth_variant(template: &str) -> String {
    template.replacen("api/{version}/", "oauth/", 1)
}

/// Resolves the REST URL for `resource` under `config`.
///
/// Leading and trailing slashes and a trailing `.json` on `resource` are
/// ignored. Private app credentials are percent-encoded into the userinfo.
pub(crate) fn rest_url(config: &ClientConfig, resource: &str) -> String {
    let resource = resource.trim_matches('/');
    let resource = resource.strip_suffix(".json").unwrap_or(resource);
    let version = config.api_version().to_string();

    let (template, userinfo) = match config.credentials() {
        Credentials::Private { api_key, password } => (
            REST_PRIVATE,
            Some((
                urlencoding::encode(api_key.as_ref()),
                urlencoding::encode(password.as_ref()),
            )),
        ),
        Credentials::Public { .. } => (REST_PUBLIC, None),
    };

    let template = if resource == ACCESS_SCOPES_RESOURCE {
        oauth_variant(template)
    } else {
        template.to_string()
    };

    let mut values: Vec<(Placeholder, &str)> = vec![
        (Placeholder::ShopifyDomain, config.shop().as_ref()),
        (Placeholder::Version, version.as_str()),
        (Placeholder::Resource, resource),
    ];
    if let Some((key, password)) = &userinfo {
        values.push((Placeholder::ApiKey, key.as_ref()));
        values.push((Placeholder::Password, password.as_ref()));
    }

    render(&template, &values)
}

/// Resolves the GraphQL URL for the configured API flavor.
pub(crate) fn graphql_url(config: &ClientConfig) -> String {
    let template = match config.flavor() {
        ApiFlavor::Admin => GRAPHQL_ADMIN,
        ApiFlavor::Storefront => GRAPHQL_STOREFRONT,
    };
    let version = config.api_version().to_string();
    render(
        template,
        &[
            (Placeholder::ShopifyDomain, config.shop().as_ref()),
            (Placeholder::Version, version.as_str()),
        ],
    )
}

/// Resolves the OAuth token exchange URL.
pub(crate) fn access_token_url(config: &ClientConfig) -> String {
    render(
        OAUTH_ACCESS_TOKEN,
        &[(Placeholder::ShopifyDomain, config.shop().as_ref())],
    )
}

/// Replaces URL userinfo with `***` so the URL can be logged.
pub(crate) fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
        None => url.to_string(),
    }
}

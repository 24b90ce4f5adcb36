//! OAuth authorization URL generation.

use crate::auth::oauth::state::StateParam;
use crate::auth::AuthScopes;
use crate::clients::url::{render, Placeholder, OAUTH_AUTHORIZE};
use crate::config::{ApiKey, ShopDomain};

/// Builds the URL a merchant is redirected to in order to grant access.
///
/// The URL targets `https://{shop}/admin/oauth/authorize` with `client_id`
/// and `scope` always present. An empty or missing `scopes` requests
/// [`AuthScopes::DEFAULT`]. `redirect_uri` and `state` are appended only when
/// given. All parameter values are percent-encoded.
///
/// This is the stateless building block behind
/// [`PublicClient::authorize_url`](crate::PublicClient::authorize_url), which
/// also remembers the state for callback validation.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::oauth::{authorize_url, StateParam};
/// use shopify_client::{ApiKey, ShopDomain};
///
/// let url = authorize_url(
///     &ShopDomain::new("foo.myshopify.com").unwrap(),
///     &ApiKey::new("my-key").unwrap(),
///     None,
///     Some("https://app.example.com/callback"),
///     Some(&StateParam::from_raw("nonce")),
/// );
///
/// assert_eq!(
///     url,
///     "https://foo.myshopify.com/admin/oauth/authorize?client_id=my-key\
///      &scope=read_products%2Cread_orders\
///      &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&state=nonce"
/// );
/// ```
#[must_use]
pub fn authorize_url(
    shop: &ShopDomain,
    api_key: &ApiKey,
    scopes: Option<&AuthScopes>,
    redirect_uri: Option<&str>,
    state: Option<&StateParam>,
) -> String {
    let scope = scopes
        .filter(|s| !s.is_empty())
        .map_or_else(|| AuthScopes::DEFAULT.to_string(), ToString::to_string);

    let mut params = vec![("client_id", api_key.as_ref().to_string()), ("scope", scope)];
    if let Some(redirect_uri) = redirect_uri {
        params.push(("redirect_uri", redirect_uri.to_string()));
    }
    if let Some(state) = state {
        params.push(("state", state.to_string()));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let base = render(OAUTH_AUTHORIZE, &[(Placeholder::ShopifyDomain, shop.as_ref())]);
    format!("{base}?{query_string}")
}

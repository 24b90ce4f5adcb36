//! Client for pre-authorized private apps.

use serde_json::Value;

use crate::clients::api_client::{ApiClient, ClientCore};
use crate::clients::headers::ClientHeaders;
use crate::clients::http_request::RequestParams;
use crate::clients::http_response::{ApiCallLimit, PaginationInfo};
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::{
    ApiFlavor, ApiKey, ApiPassword, ApiVersion, ClientConfig, Credentials, ShopDomain,
};
use crate::error::{ConfigError, Error};

/// A client for a private app: a fixed API key and password, no OAuth.
///
/// REST calls authenticate with the key and password embedded as URL
/// userinfo. GraphQL calls send the password as the access token header,
/// which for the Storefront flavor is the storefront access token.
///
/// # Example
///
/// ```rust,no_run
/// use shopify_client::{private_app, ApiClient, RequestParams};
///
/// # async fn run() -> Result<(), shopify_client::Error> {
/// let mut client = private_app("foo.myshopify.com", "api-key", "password")?;
/// let shop = client.call("GET", "shop", RequestParams::new()).await?;
/// println!("{}", shop["shop"]["name"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PrivateClient<T = ReqwestTransport> {
    core: ClientCore<T>,
}

// Verify PrivateClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PrivateClient>();
};

impl PrivateClient {
    /// Creates a client sending requests through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialMismatch`] if `config` does not hold
    /// private app credentials, or [`ConfigError::HttpClientInit`] if the
    /// HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> PrivateClient<T> {
    /// Creates a client sending requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialMismatch`] if `config` does not hold
    /// private app credentials.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, Error> {
        let Credentials::Private { password, .. } = config.credentials() else {
            return Err(ConfigError::CredentialMismatch {
                expected: "private",
            }
            .into());
        };

        let headers = ClientHeaders::build(config.flavor(), None, Some(password.as_ref()));
        Ok(Self {
            core: ClientCore::new(config, headers, transport),
        })
    }

    /// Returns the header sets attached to REST and GraphQL calls.
    #[must_use]
    pub const fn headers(&self) -> &ClientHeaders {
        &self.core.headers
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        self.core.executor.transport()
    }
}

impl<T: Transport> ApiClient for PrivateClient<T> {
    fn config(&self) -> &ClientConfig {
        &self.core.config
    }

    async fn call(
        &mut self,
        method: &str,
        resource: &str,
        params: RequestParams,
    ) -> Result<Value, Error> {
        self.core.call(method, resource, params).await
    }

    async fn call_graphql(&mut self, query: &str) -> Result<Value, Error> {
        self.core.call_graphql(query).await
    }

    fn pagination(&self) -> &PaginationInfo {
        self.core.executor.pagination()
    }

    fn is_throttled(&self) -> bool {
        self.core.executor.is_throttled()
    }

    fn last_call_limit(&self) -> Option<ApiCallLimit> {
        self.core.executor.last_call_limit()
    }
}

/// Builds a [`PrivateClient`] for the Admin API at the latest API version.
///
/// # Errors
///
/// Returns [`Error::Config`] if the shop domain or a credential is invalid.
pub fn private_app(shop: &str, api_key: &str, password: &str) -> Result<PrivateClient, Error> {
    let config = ClientConfig::builder()
        .shop(ShopDomain::new(shop)?)
        .credentials(Credentials::private(
            ApiKey::new(api_key)?,
            ApiPassword::new(password)?,
        ))
        .build()?;
    PrivateClient::new(config)
}

/// Builds a [`PrivateClient`] for the Storefront API.
///
/// `storefront_token` is the storefront access token; it is also used as
/// the password for any REST call.
///
/// # Errors
///
/// Returns [`Error::Config`] if the shop domain, a credential or `version`
/// is invalid.
pub fn storefront_app(
    shop: &str,
    api_key: &str,
    storefront_token: &str,
    version: &str,
) -> Result<PrivateClient, Error> {
    let config = ClientConfig::builder()
        .shop(ShopDomain::new(shop)?)
        .credentials(Credentials::private(
            ApiKey::new(api_key)?,
            ApiPassword::new(storefront_token)?,
        ))
        .api_version(version.parse::<ApiVersion>()?)
        .flavor(ApiFlavor::Storefront)
        .build()?;
    PrivateClient::new(config)
}

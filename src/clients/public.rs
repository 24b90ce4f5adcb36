//! Client for OAuth-delegated public apps.

use serde_json::{json, Value};

use crate::auth::oauth::{
    authorize_url, constant_time_compare, validate_hmac, AuthQuery, AuthValidationError,
    StateParam,
};
use crate::auth::AuthScopes;
use crate::clients::api_client::{ApiClient, ClientCore};
use crate::clients::errors::ApiError;
use crate::clients::executor::decode_body;
use crate::clients::headers::ClientHeaders;
use crate::clients::http_request::{HttpMethod, RequestParams};
use crate::clients::http_response::{ApiCallLimit, PaginationInfo, REQUEST_ID_HEADER};
use crate::clients::transport::{Payload, ReqwestTransport, Transport, TransportRequest};
use crate::clients::url::access_token_url;
use crate::config::{AccessToken, ApiKey, ApiSecretKey, ClientConfig, Credentials, ShopDomain};
use crate::error::{ConfigError, Error};

/// A client for a public app that obtains its access token through OAuth.
///
/// The OAuth entry sequence runs once, before API calls:
///
/// 1. [`authorize_url`](Self::authorize_url) builds the redirect and
///    remembers the anti-forgery state.
/// 2. [`exchange_code_for_token`](Self::exchange_code_for_token) validates
///    the callback and installs the obtained token.
///
/// A token obtained earlier can be installed directly with
/// [`set_access_token`](Self::set_access_token).
///
/// # Example
///
/// ```rust,no_run
/// use shopify_client::auth::oauth::{AuthQuery, StateParam};
/// use shopify_client::{public_app, ApiClient, RequestParams};
///
/// # async fn run(callback_query: &str) -> Result<(), shopify_client::Error> {
/// let mut client = public_app("foo.myshopify.com", "api-key", "api-secret")?;
///
/// // Redirect the merchant here.
/// let url = client.authorize_url(
///     Some("https://app.example.com/callback"),
///     None,
///     Some(StateParam::new()),
/// );
///
/// // On the callback:
/// let query = AuthQuery::parse(callback_query);
/// let token = client.exchange_code_for_token(&query).await?;
///
/// let products = client.call("GET", "products", RequestParams::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PublicClient<T = ReqwestTransport> {
    core: ClientCore<T>,
    access_token: Option<AccessToken>,
    state: Option<StateParam>,
    granted_scopes: Option<AuthScopes>,
}

// Verify PublicClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PublicClient>();
};

impl PublicClient {
    /// Creates a client sending requests through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialMismatch`] if `config` does not hold
    /// public app credentials, or [`ConfigError::HttpClientInit`] if the
    /// HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> PublicClient<T> {
    /// Creates a client sending requests through `transport`.
    ///
    /// The client starts without an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialMismatch`] if `config` does not hold
    /// public app credentials.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, Error> {
        if config.credentials().is_private() {
            return Err(ConfigError::CredentialMismatch { expected: "public" }.into());
        }

        let headers = ClientHeaders::build(config.flavor(), None, None);
        Ok(Self {
            core: ClientCore::new(config, headers, transport),
            access_token: None,
            state: None,
            granted_scopes: None,
        })
    }

    /// Installs an access token and returns the client.
    #[must_use]
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.set_access_token(token);
        self
    }

    /// Installs an access token, rebuilding the REST and GraphQL headers.
    pub fn set_access_token(&mut self, token: AccessToken) {
        self.core.headers = ClientHeaders::build(
            self.core.config.flavor(),
            Some(token.as_ref()),
            Some(token.as_ref()),
        );
        self.access_token = Some(token);
        tracing::debug!(shop = %self.core.config.shop(), "Installed access token");
    }

    /// Returns the installed access token.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the scopes granted by the last token exchange.
    #[must_use]
    pub const fn granted_scopes(&self) -> Option<&AuthScopes> {
        self.granted_scopes.as_ref()
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

    /// Builds the OAuth authorize URL for this shop.
    ///
    /// Missing or empty `scopes` request [`AuthScopes::DEFAULT`]. A given
    /// `state` is stored on the client, replacing any previous one, and
    /// appended to the URL.
    pub fn authorize_url(
        &mut self,
        redirect_uri: Option<&str>,
        scopes: Option<&AuthScopes>,
        state: Option<StateParam>,
    ) -> String {
        if let Some(state) = state {
            self.state = Some(state);
        }
        let config = &self.core.config;
        authorize_url(
            config.shop(),
            config.credentials().api_key(),
            scopes,
            redirect_uri,
            self.state.as_ref(),
        )
    }

    /// Stores the anti-forgery state expected on the callback.
    pub fn set_state(&mut self, state: StateParam) {
        self.state = Some(state);
    }

    /// Returns the stored anti-forgery state.
    #[must_use]
    pub const fn state(&self) -> Option<&StateParam> {
        self.state.as_ref()
    }

    /// Returns `true` if the callback's `state` equals the stored state.
    ///
    /// False when either side is missing.
    #[must_use]
    pub fn validate_state(&self, query: &AuthQuery) -> bool {
        match (&self.state, query.state()) {
            (Some(stored), Some(received)) => constant_time_compare(stored.as_ref(), received),
            _ => false,
        }
    }

    /// Returns `true` if `hmac` is the signature of `query` under the app
    /// secret, or under the previous secret when one is configured.
    ///
    /// Any `hmac` entry inside `query` is ignored for signing.
    #[must_use]
    pub fn validate_hmac(&self, query: &AuthQuery, hmac: &str) -> bool {
        let Credentials::Public {
            api_secret_key,
            old_api_secret_key,
            ..
        } = self.core.config.credentials()
        else {
            return false;
        };
        validate_hmac(query, hmac, api_secret_key, old_api_secret_key.as_ref())
    }

    /// Validates an OAuth callback and exchanges its code for an access token.
    ///
    /// On success the token is installed, the stored state is consumed, and
    /// the token is returned so the caller can persist it.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthFlow`] if `code` or `hmac` is missing
    /// - [`Error::AuthValidation`] if a `state` is present but differs from
    ///   the stored one, or if the signature does not verify
    /// - [`Error::Api`] if the exchange request fails or the response lacks
    ///   an access token
    pub async fn exchange_code_for_token(&mut self, query: &AuthQuery) -> Result<AccessToken, Error> {
        let (Some(code), Some(hmac)) = (query.code(), query.hmac()) else {
            return Err(Error::AuthFlow {
                reason: "callback is missing 'code' or 'hmac'".to_string(),
            });
        };

        if let Some(received) = query.state() {
            if !self.validate_state(query) {
                return Err(AuthValidationError::StateMismatch {
                    expected: self.state.as_ref().map(ToString::to_string),
                    received: received.to_string(),
                }
                .into());
            }
        }

        if !self.validate_hmac(query, hmac) {
            return Err(AuthValidationError::InvalidHmac.into());
        }

        let (api_key, api_secret_key) = client_credentials(&self.core.config)?;
        let request = TransportRequest {
            method: HttpMethod::Post,
            url: access_token_url(&self.core.config),
            headers: Vec::new(),
            payload: Payload::Json(json!({
                "client_id": api_key.as_ref(),
                "client_secret": api_secret_key.as_ref(),
                "code": code,
            })),
        };

        let response = self.core.executor.execute_unmetered(request).await?;
        let body = decode_body(&response)?;

        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .and_then(|token| AccessToken::new(token).ok())
            .ok_or_else(|| ApiError {
                code: response.status,
                message: "OAuth response did not contain an access token".to_string(),
                detail: Some(body.clone()),
                error_reference: response.header(REQUEST_ID_HEADER).map(String::from),
            })?;

        self.granted_scopes = body
            .get("scope")
            .and_then(Value::as_str)
            .and_then(|scope| scope.parse().ok());
        self.state = None;
        self.set_access_token(token.clone());

        Ok(token)
    }
}

fn client_credentials(config: &ClientConfig) -> Result<(&ApiKey, &ApiSecretKey), Error> {
    match config.credentials() {
        Credentials::Public {
            api_key,
            api_secret_key,
            ..
        } => Ok((api_key, api_secret_key)),
        Credentials::Private { .. } => {
            Err(ConfigError::CredentialMismatch { expected: "public" }.into())
        }
    }
}

impl<T: Transport> ApiClient for PublicClient<T> {
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

/// Builds a [`PublicClient`] for the Admin API at the latest API version.
///
/// # Errors
///
/// Returns [`Error::Config`] if the shop domain or a credential is invalid.
pub fn public_app(shop: &str, api_key: &str, api_secret_key: &str) -> Result<PublicClient, Error> {
    let config = ClientConfig::builder()
        .shop(ShopDomain::new(shop)?)
        .credentials(Credentials::public(
            ApiKey::new(api_key)?,
            ApiSecretKey::new(api_secret_key)?,
        ))
        .build()?;
    PublicClient::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::compute_signature;
    use crate::clients::headers::ACCESS_TOKEN_HEADER;
    use crate::config::ApiPassword;
    use crate::error::ErrorKind;

    fn client() -> PublicClient {
        public_app("foo.myshopify.com", "key", "hush").unwrap()
    }

    fn signed(query: AuthQuery, secret: &str) -> AuthQuery {
        let hmac = compute_signature(&query.to_signable_string(), secret);
        query.with("hmac", hmac)
    }

    // ========================================================================
    // Construction and tokens
    // ========================================================================

    #[test]
    fn test_rejects_private_credentials() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("foo.myshopify.com").unwrap())
            .credentials(Credentials::private(
                ApiKey::new("key").unwrap(),
                ApiPassword::new("password").unwrap(),
            ))
            .build()
            .unwrap();

        let error = PublicClient::new(config).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ConfigValidation);
    }

    #[test]
    fn test_starts_without_token_header() {
        let client = client();
        assert!(client.access_token().is_none());
        assert!(client.headers().rest().get(ACCESS_TOKEN_HEADER).is_none());
        assert!(client.headers().graphql().get(ACCESS_TOKEN_HEADER).is_none());
    }

    #[test]
    fn test_set_access_token_rebuilds_both_header_sets() {
        let mut client = client();
        client.set_access_token(AccessToken::new("shpat_1").unwrap());
        assert_eq!(client.headers().rest().get(ACCESS_TOKEN_HEADER), Some("shpat_1"));
        assert_eq!(client.headers().graphql().get(ACCESS_TOKEN_HEADER), Some("shpat_1"));

        client.set_access_token(AccessToken::new("shpat_2").unwrap());
        assert_eq!(client.headers().rest().get(ACCESS_TOKEN_HEADER), Some("shpat_2"));
        assert_eq!(client.headers().graphql().get(ACCESS_TOKEN_HEADER), Some("shpat_2"));
    }

    // ========================================================================
    // Authorize URL and state
    // ========================================================================

    #[test]
    fn test_authorize_url_stores_state() {
        let mut client = client();
        let url = client.authorize_url(
            Some("https://app.example.com/cb"),
            None,
            Some(StateParam::from_raw("nonce-1")),
        );

        assert!(url.starts_with("https://foo.myshopify.com/admin/oauth/authorize?client_id=key"));
        assert!(url.ends_with("&state=nonce-1"));
        assert_eq!(client.state().map(StateParam::nonce), Some("nonce-1"));
    }

    #[test]
    fn test_authorize_url_without_state_omits_it() {
        let mut client = client();
        let url = client.authorize_url(None, None, None);
        assert!(!url.contains("state="));
        assert!(client.state().is_none());
    }

    #[test]
    fn test_validate_state() {
        let mut client = client();
        let query = AuthQuery::new().with("state", "foo");
        assert!(!client.validate_state(&query));

        client.set_state(StateParam::from_raw("foo"));
        assert!(client.validate_state(&query));

        client.set_state(StateParam::from_raw("bar"));
        assert!(!client.validate_state(&query));
        assert!(!client.validate_state(&AuthQuery::new()));
    }

    #[test]
    fn test_validate_hmac_with_rotated_secret() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("foo.myshopify.com").unwrap())
            .credentials(
                Credentials::public(
                    ApiKey::new("key").unwrap(),
                    ApiSecretKey::new("new").unwrap(),
                )
                .with_old_secret(ApiSecretKey::new("old").unwrap()),
            )
            .build()
            .unwrap();
        let client = PublicClient::new(config).unwrap();

        let query = AuthQuery::new().with("code", "c").with("shop", "foo.myshopify.com");
        let old_sig = compute_signature(&query.to_signable_string(), "old");
        let new_sig = compute_signature(&query.to_signable_string(), "new");
        assert!(client.validate_hmac(&query, &old_sig));
        assert!(client.validate_hmac(&query, &new_sig));
        assert!(!client.validate_hmac(&query, "0000"));
    }

    // ========================================================================
    // Callback validation (no network)
    // ========================================================================

    #[tokio::test]
    async fn test_exchange_requires_code_and_hmac() {
        let mut client = client();
        let error = client
            .exchange_code_for_token(&AuthQuery::new().with("code", "c"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AuthFlow);

        let error = client
            .exchange_code_for_token(&AuthQuery::new().with("hmac", "h"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AuthFlow);
    }

    #[tokio::test]
    async fn test_exchange_rejects_state_mismatch() {
        let mut client = client();
        client.set_state(StateParam::from_raw("bar"));
        let query = signed(
            AuthQuery::new().with("code", "c").with("state", "foo"),
            "hush",
        );

        let error = client.exchange_code_for_token(&query).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AuthValidation);
        assert!(matches!(
            error,
            Error::AuthValidation(AuthValidationError::StateMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_exchange_rejects_bad_hmac() {
        let mut client = client();
        let query = signed(AuthQuery::new().with("code", "c"), "wrong-secret");

        let error = client.exchange_code_for_token(&query).await.unwrap_err();
        assert!(matches!(
            error,
            Error::AuthValidation(AuthValidationError::InvalidHmac)
        ));
        assert!(client.access_token().is_none());
    }
}

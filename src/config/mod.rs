//! Configuration types for the Shopify app client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: Immutable settings for one shop connection
//! - [`ClientConfigBuilder`]: Fluent builder for [`ClientConfig`]
//! - [`Credentials`]: Private (key + password) or public (key + secret) app credentials
//! - [`ApiFlavor`]: Admin API or Storefront API
//! - [`ThrottleConfig`]: Settings for the client-side rate-limit governor
//! - Validated newtypes: [`ShopDomain`], [`ApiKey`], [`ApiSecretKey`],
//!   [`ApiPassword`], [`AccessToken`], [`HostUrl`], and [`ApiVersion`]
//!
//! # Example
//!
//! ```rust
//! use shopify_client::{ClientConfig, Credentials, ApiKey, ApiPassword, ShopDomain, ApiVersion};
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("foo.myshopify.com").unwrap())
//!     .credentials(Credentials::private(
//!         ApiKey::new("my-api-key").unwrap(),
//!         ApiPassword::new("my-password").unwrap(),
//!     ))
//!     .api_version(ApiVersion::V2021_07)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "foo.myshopify.com");
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{AccessToken, ApiKey, ApiPassword, ApiSecretKey, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Which Shopify API surface the client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiFlavor {
    /// The Admin API (REST and GraphQL under `/admin`).
    #[default]
    Admin,
    /// The Storefront API (GraphQL under `/api`).
    Storefront,
}

/// Credentials identifying the app to the shop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// A pre-authorized private app.
    Private {
        /// The app's API key.
        api_key: ApiKey,
        /// The app's password, used as the bearer credential.
        password: ApiPassword,
    },
    /// A public app that obtains its token through OAuth.
    Public {
        /// The app's API key (OAuth client id).
        api_key: ApiKey,
        /// The app's shared secret (OAuth client secret).
        api_secret_key: ApiSecretKey,
        /// A previous shared secret still accepted for callback signatures.
        old_api_secret_key: Option<ApiSecretKey>,
    },
}

impl Credentials {
    /// Creates private app credentials.
    #[must_use]
    pub const fn private(api_key: ApiKey, password: ApiPassword) -> Self {
        Self::Private { api_key, password }
    }

    /// Creates public app credentials.
    #[must_use]
    pub const fn public(api_key: ApiKey, api_secret_key: ApiSecretKey) -> Self {
        Self::Public {
            api_key,
            api_secret_key,
            old_api_secret_key: None,
        }
    }

    /// Adds a previous shared secret for key rotation.
    ///
    /// Has no effect on private app credentials.
    #[must_use]
    pub fn with_old_secret(self, old: ApiSecretKey) -> Self {
        match self {
            Self::Public {
                api_key,
                api_secret_key,
                ..
            } => Self::Public {
                api_key,
                api_secret_key,
                old_api_secret_key: Some(old),
            },
            private @ Self::Private { .. } => private,
        }
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        match self {
            Self::Private { api_key, .. } | Self::Public { api_key, .. } => api_key,
        }
    }

    /// Returns `true` for private app credentials.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private { .. })
    }
}

/// Settings for the client-side rate-limit governor.
///
/// After each REST response the governor compares `made / allowed` from the
/// call-limit header against `threshold`; at or above it, the next call is
/// delayed by a uniformly random duration in `[min_delay, max_delay]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrottleConfig {
    threshold: f64,
    min_delay: Duration,
    max_delay: Duration,
    apply_to_graphql: bool,
}

impl ThrottleConfig {
    /// Default fill ratio at which throttling starts.
    pub const DEFAULT_THRESHOLD: f64 = 0.8;
    /// Default lower bound of the throttle delay.
    pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(3);
    /// Default upper bound of the throttle delay.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(6);

    /// Creates throttle settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThrottle`] if `threshold` is not in
    /// `(0, 1]` or `min_delay` exceeds `max_delay`.
    pub fn new(threshold: f64, min_delay: Duration, max_delay: Duration) -> Result<Self, ConfigError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidThrottle {
                reason: format!("threshold must be in (0, 1], got {threshold}"),
            });
        }
        if min_delay > max_delay {
            return Err(ConfigError::InvalidThrottle {
                reason: format!("min delay {min_delay:?} exceeds max delay {max_delay:?}"),
            });
        }
        Ok(Self {
            threshold,
            min_delay,
            max_delay,
            apply_to_graphql: false,
        })
    }

    /// Also delays GraphQL calls while the throttle flag is set.
    #[must_use]
    pub const fn apply_to_graphql(mut self, apply: bool) -> Self {
        self.apply_to_graphql = apply;
        self
    }

    /// Returns the fill ratio at which throttling starts.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the delay bounds.
    #[must_use]
    pub const fn delay_range(&self) -> (Duration, Duration) {
        (self.min_delay, self.max_delay)
    }

    /// Returns whether GraphQL calls are throttled too.
    #[must_use]
    pub const fn applies_to_graphql(&self) -> bool {
        self.apply_to_graphql
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            min_delay: Self::DEFAULT_MIN_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            apply_to_graphql: false,
        }
    }
}

/// Configuration for one client connection to a shop.
///
/// Immutable after [`build`](ClientConfigBuilder::build). The only mutable
/// credential, the public app access token, lives on the client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    shop: ShopDomain,
    credentials: Credentials,
    api_version: ApiVersion,
    flavor: ApiFlavor,
    throttle: ThrottleConfig,
    max_tries: u32,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the app credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the API flavor.
    #[must_use]
    pub const fn flavor(&self) -> ApiFlavor {
        self.flavor
    }

    /// Returns the rate-limit governor settings.
    #[must_use]
    pub const fn throttle(&self) -> &ThrottleConfig {
        &self.throttle
    }

    /// Returns how many times a rate-limited (429) request is attempted.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `shop` and `credentials` are required.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest()`]
/// - `flavor`: [`ApiFlavor::Admin`]
/// - `throttle`: [`ThrottleConfig::default()`] (0.8 threshold, 3-6 s delay, REST only)
/// - `max_tries`: `1` (no automatic retry)
/// - `api_host`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    shop: Option<ShopDomain>,
    credentials: Option<Credentials>,
    api_version: Option<ApiVersion>,
    flavor: Option<ApiFlavor>,
    throttle: Option<ThrottleConfig>,
    max_tries: Option<u32>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the app credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the API flavor.
    #[must_use]
    pub const fn flavor(mut self, flavor: ApiFlavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    /// Sets the rate-limit governor settings.
    #[must_use]
    pub const fn throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Sets how many times a 429 response is attempted before giving up.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = Some(tries);
        self
    }

    /// Routes requests to `host` instead of the shop domain.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` or
    /// `credentials` are not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let credentials = self
            .credentials
            .ok_or(ConfigError::MissingRequiredField {
                field: "credentials",
            })?;

        Ok(ClientConfig {
            shop,
            credentials,
            api_version: self.api_version.unwrap_or_default(),
            flavor: self.flavor.unwrap_or_default(),
            throttle: self.throttle.unwrap_or_default(),
            max_tries: self.max_tries.unwrap_or(1).max(1),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private_credentials() -> Credentials {
        Credentials::private(
            ApiKey::new("key").unwrap(),
            ApiPassword::new("password").unwrap(),
        )
    }

    #[test]
    fn test_builder_requires_shop() {
        let result = ClientConfig::builder()
            .credentials(private_credentials())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = ClientConfig::builder()
            .shop(ShopDomain::new("foo.myshopify.com").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "credentials"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("foo.myshopify.com").unwrap())
            .credentials(private_credentials())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), ApiVersion::latest());
        assert_eq!(config.flavor(), ApiFlavor::Admin);
        assert_eq!(config.throttle(), &ThrottleConfig::default());
        assert_eq!(config.max_tries(), 1);
        assert!(config.api_host().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_max_tries_floor_is_one() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("foo.myshopify.com").unwrap())
            .credentials(private_credentials())
            .max_tries(0)
            .build()
            .unwrap();

        assert_eq!(config.max_tries(), 1);
    }

    #[test]
    fn test_throttle_config_validation() {
        assert!(ThrottleConfig::new(0.8, Duration::from_secs(1), Duration::from_secs(2)).is_ok());
        assert!(ThrottleConfig::new(1.0, Duration::ZERO, Duration::ZERO).is_ok());
        assert!(matches!(
            ThrottleConfig::new(0.0, Duration::ZERO, Duration::ZERO),
            Err(ConfigError::InvalidThrottle { .. })
        ));
        assert!(matches!(
            ThrottleConfig::new(1.5, Duration::ZERO, Duration::ZERO),
            Err(ConfigError::InvalidThrottle { .. })
        ));
        assert!(matches!(
            ThrottleConfig::new(0.8, Duration::from_secs(6), Duration::from_secs(3)),
            Err(ConfigError::InvalidThrottle { .. })
        ));
    }

    #[test]
    fn test_default_throttle_matches_platform_guidance() {
        let throttle = ThrottleConfig::default();
        assert!((throttle.threshold() - 0.8).abs() < f64::EPSILON);
        assert_eq!(
            throttle.delay_range(),
            (Duration::from_secs(3), Duration::from_secs(6))
        );
        assert!(!throttle.applies_to_graphql());
    }

    #[test]
    fn test_old_secret_only_applies_to_public_credentials() {
        let public = Credentials::public(
            ApiKey::new("key").unwrap(),
            ApiSecretKey::new("new").unwrap(),
        )
        .with_old_secret(ApiSecretKey::new("old").unwrap());
        assert!(matches!(
            public,
            Credentials::Public {
                old_api_secret_key: Some(_),
                ..
            }
        ));

        let private = private_credentials().with_old_secret(ApiSecretKey::new("old").unwrap());
        assert_eq!(private, private_credentials());
        assert!(private.is_private());
        assert_eq!(private.api_key().as_ref(), "key");
    }
}

//! Validated newtype wrappers for configuration values.
//!
//! Each type checks its contents on construction, so a value that exists is
//! a value that can be used. Secret-bearing types mask themselves in `Debug`.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Shopify API key.
///
/// # Example
///
/// ```rust
/// use shopify_client::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Declares a non-empty secret string newtype with masked `Debug` output.
macro_rules! secret_newtype {
    ($(#[$meta:meta])* $name:ident, $empty:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Creates a new validated value.
            ///
            /// # Errors
            ///
            /// Returns a [`ConfigError`] if the value is empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.is_empty() {
                    return Err($empty);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }
    };
}

secret_newtype!(
    /// A public app's shared secret, used to sign OAuth callbacks.
    ///
    /// ```rust
    /// use shopify_client::ApiSecretKey;
    ///
    /// let secret = ApiSecretKey::new("my-secret").unwrap();
    /// assert_eq!(format!("{:?}", secret), "ApiSecretKey(*****)");
    /// ```
    ApiSecretKey,
    ConfigError::EmptyApiSecretKey
);

secret_newtype!(
    /// A private app's password.
    ///
    /// The password is embedded in REST URLs as basic-auth userinfo and sent
    /// as the access token on GraphQL calls.
    ApiPassword,
    ConfigError::EmptyApiPassword
);

secret_newtype!(
    /// A bearer access token obtained through OAuth or supplied directly.
    AccessToken,
    ConfigError::EmptyAccessToken
);

/// A validated Shopify shop domain.
///
/// The domain must be the full `*.myshopify.com` (or `*.myshopify.io`) host
/// with a 3-100 character shop name made of ASCII letters, digits and
/// hyphens. The value is kept exactly as given.
///
/// # Example
///
/// ```rust
/// use shopify_client::ShopDomain;
///
/// let domain = ShopDomain::new("foo.myshopify.com").unwrap();
/// assert_eq!(domain.shop_name(), "foo");
///
/// assert!(ShopDomain::new("ab.myshopify.com").is_err());
/// assert!(ShopDomain::new("foo").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIXES: [&'static str; 2] = [".myshopify.com", ".myshopify.io"];
    const MIN_NAME_LEN: usize = 3;
    const MAX_NAME_LEN: usize = 100;

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();

        let shop_name = Self::SUFFIXES
            .iter()
            .find_map(|suffix| domain.strip_suffix(suffix))
            .filter(|name| Self::is_valid_shop_name(name));

        match shop_name {
            Some(name) => Ok(Self {
                shop_name_end: name.len(),
                full_domain: domain,
            }),
            None => Err(ConfigError::InvalidShopDomain { domain }),
        }
    }

    /// Returns the shop name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    fn is_valid_shop_name(name: &str) -> bool {
        (Self::MIN_NAME_LEN..=Self::MAX_NAME_LEN).contains(&name.len())
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated host URL that requests are routed to instead of the shop.
///
/// Used for proxies and for pointing a client at a local mock server.
///
/// # Example
///
/// ```rust
/// use shopify_client::HostUrl;
///
/// let url = HostUrl::new("http://127.0.0.1:8080").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "127.0.0.1");
/// assert_eq!(url.port(), Some(8080));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    port: Option<u16>,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL has no scheme, no
    /// host, or an unparseable port.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidHostUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        let port = match url[host_end..].strip_prefix(':') {
            Some(rest) => {
                let digits = rest.split(['/', '?', '#']).next().unwrap_or_default();
                Some(digits.parse::<u16>().map_err(|_| invalid())?)
            }
            None => None,
        };

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            port,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the explicit port, if one was given.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

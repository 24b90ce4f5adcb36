//! Error types for the Shopify app client.
//!
//! Configuration problems surface as [`ConfigError`] when a value is
//! constructed. Everything a client operation can fail with is collected in
//! [`Error`], whose [`kind`](Error::kind) tag lets callers branch without
//! parsing message text.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::{ConfigError, ShopDomain};
//!
//! let result = ShopDomain::new("ab.myshopify.com");
//! assert!(matches!(result, Err(ConfigError::InvalidShopDomain { .. })));
//! ```

use thiserror::Error;

use crate::auth::oauth::AuthValidationError;
use crate::clients::ApiError;

/// Errors that can occur while building client configuration.
///
/// Every variant is raised at construction time, before any network I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide a valid Shopify API secret key.")]
    EmptyApiSecretKey,

    /// Private app password cannot be empty.
    #[error("API password cannot be empty. Please provide the private app password.")]
    EmptyApiPassword,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Shop name should be 3-100 letters, numbers, or hyphens, eg 'mypetstore.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2021-07') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Throttle settings are inconsistent.
    #[error("Invalid throttle configuration: {reason}")]
    InvalidThrottle {
        /// The reason the settings were rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The credentials do not fit the client being constructed.
    #[error("A {expected} app client requires {expected} app credentials.")]
    CredentialMismatch {
        /// The app type the client expected (`private` or `public`).
        expected: &'static str,
    },

    /// The underlying HTTP client could not be initialized.
    #[error("Failed to initialize HTTP client: {reason}")]
    HttpClientInit {
        /// The transport's error text.
        reason: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid shop domain, API version, or other configuration value.
    ConfigValidation,
    /// Unsupported HTTP verb passed to `call`.
    InvalidMethod,
    /// OAuth callback missing required fields.
    AuthFlow,
    /// State or HMAC mismatch on an OAuth callback.
    AuthValidation,
    /// Failure reported by the remote endpoint.
    Api,
}

/// Unified error type for every client operation.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_client::{ApiClient, Error, ErrorKind};
///
/// match client.call("GET", "products", Default::default()).await {
///     Ok(body) => println!("{body}"),
///     Err(e) if e.kind() == ErrorKind::Api && e.status_code() == 429 => {
///         // back off and try again later
///     }
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP method is not one of GET, POST, PUT, DELETE.
    #[error("Invalid HTTP method '{method}'. POST,PUT,GET,DELETE http methods are allowed.")]
    InvalidMethod {
        /// The rejected method.
        method: String,
    },

    /// The OAuth callback lacks the parameters needed to authorize.
    #[error("Unable to authorise app, check your credentials: {reason}")]
    AuthFlow {
        /// What was missing.
        reason: String,
    },

    /// The OAuth callback failed state or HMAC validation.
    #[error(transparent)]
    AuthValidation(#[from] AuthValidationError),

    /// The remote endpoint reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns the kind tag for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::ConfigValidation,
            Self::InvalidMethod { .. } => ErrorKind::InvalidMethod,
            Self::AuthFlow { .. } => ErrorKind::AuthFlow,
            Self::AuthValidation(_) => ErrorKind::AuthValidation,
            Self::Api(_) => ErrorKind::Api,
        }
    }

    /// Returns the HTTP status for API errors, and 0 for everything else.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Api(e) => e.code,
            _ => 0,
        }
    }
}

// Verify Error is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shop_domain_error_message() {
        let error = ConfigError::InvalidShopDomain {
            domain: "bad domain!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad domain!"));
        assert!(message.contains("3-100 letters"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "shop" };
        let message = error.to_string();
        assert!(message.contains("shop"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_kind_tags() {
        let config: Error = ConfigError::EmptyApiKey.into();
        assert_eq!(config.kind(), ErrorKind::ConfigValidation);

        let method = Error::InvalidMethod {
            method: "PATCH".to_string(),
        };
        assert_eq!(method.kind(), ErrorKind::InvalidMethod);
        assert!(method.to_string().contains("PATCH"));

        let flow = Error::AuthFlow {
            reason: "missing code".to_string(),
        };
        assert_eq!(flow.kind(), ErrorKind::AuthFlow);

        let validation: Error = AuthValidationError::InvalidHmac.into();
        assert_eq!(validation.kind(), ErrorKind::AuthValidation);
    }

    #[test]
    fn test_status_code_only_for_api_errors() {
        let api: Error = ApiError {
            code: 404,
            message: "Not Found".to_string(),
            detail: None,
            error_reference: None,
        }
        .into();
        assert_eq!(api.kind(), ErrorKind::Api);
        assert_eq!(api.status_code(), 404);

        let config: Error = ConfigError::EmptyApiKey.into();
        assert_eq!(config.status_code(), 0);
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = Error::from(ConfigError::EmptyApiKey);
        let _: &dyn std::error::Error = &error;
    }
}

//! OAuth authorization code flow for public apps.
//!
//! The flow runs once per shop, before any API call:
//!
//! 1. **Authorize** ([`authorize_url`]): redirect the merchant to Shopify with
//!    the app's client id, requested scopes and an optional anti-forgery
//!    [`StateParam`].
//! 2. **Callback**: Shopify redirects back with `code`, `hmac`, `shop`,
//!    `timestamp` and the echoed `state`, captured as an [`AuthQuery`].
//! 3. **Validate**: the state must equal the stored one and the
//!    [`hmac`] signature must verify against the app secret.
//! 4. **Exchange**: the code is traded for an access token.
//!
//! Steps 1, 3 and 4 are driven by [`PublicClient`](crate::PublicClient); this
//! module holds the pieces it is built from.
//!
//! # Security
//!
//! - HMAC and state comparisons are constant-time
//! - A previous shared secret may be configured for key rotation
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::oauth::{hmac, AuthQuery};
//! use shopify_client::ApiSecretKey;
//!
//! let query = AuthQuery::parse("code=abc&shop=foo.myshopify.com&timestamp=1337178173");
//! let signature = hmac::compute_signature(&query.to_signable_string(), "secret");
//!
//! let secret = ApiSecretKey::new("secret").unwrap();
//! assert!(hmac::validate_hmac(&query, &signature, &secret, None));
//! ```

mod auth_query;
mod authorize;
mod error;
pub mod hmac;
mod state;

pub use auth_query::AuthQuery;
pub use authorize::authorize_url;
pub use error::AuthValidationError;
pub use self::hmac::{compute_signature, constant_time_compare, validate_hmac};
pub use state::StateParam;

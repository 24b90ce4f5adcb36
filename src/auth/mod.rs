//! Authentication types for public apps.
//!
//! - [`AuthScopes`]: A set of OAuth access scopes
//! - [`oauth`]: Authorize URL construction, callback validation and the
//!   building blocks of the authorization-code exchange
//!
//! The exchange itself runs through
//! [`PublicClient::exchange_code_for_token`](crate::PublicClient::exchange_code_for_token),
//! which installs the obtained token on the client.

pub mod oauth;
mod scopes;

pub use scopes::AuthScopes;

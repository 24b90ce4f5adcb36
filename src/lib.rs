//! # Shopify App Client
//!
//! A Rust client for the Shopify REST and GraphQL APIs, for private apps
//! holding a fixed key and password and for public apps authorized through
//! OAuth.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for credentials, shop domains and API versions
//! - [`PrivateClient`] and [`PublicClient`], both implementing [`ApiClient`]
//! - OAuth authorize URL, callback validation and code exchange via
//!   [`auth::oauth`] and [`PublicClient`]
//! - Cursor pagination read from `Link` headers
//! - Client-side throttling driven by the API call-limit header
//!
//! ## Private apps
//!
//! ```rust,no_run
//! use shopify_client::{private_app, ApiClient, RequestParams};
//!
//! # async fn run() -> Result<(), shopify_client::Error> {
//! let mut client = private_app("foo.myshopify.com", "api-key", "password")?;
//!
//! let products = client
//!     .call("GET", "products", RequestParams::new().with("limit", 5))
//!     .await?;
//! if let Some(cursor) = client.next_page() {
//!     println!("more products after {cursor}");
//! }
//!
//! let shop = client.call_graphql("{ shop { name } }").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Public apps
//!
//! ```rust,no_run
//! use shopify_client::auth::oauth::{AuthQuery, StateParam};
//! use shopify_client::{public_app, ApiClient, AuthScopes, RequestParams};
//!
//! # async fn run(callback_query: &str) -> Result<(), shopify_client::Error> {
//! let mut client = public_app("foo.myshopify.com", "api-key", "api-secret")?;
//! let redirect = client.authorize_url(
//!     Some("https://app.example.com/auth/callback"),
//!     Some(&"read_products,write_orders".parse::<AuthScopes>()?),
//!     Some(StateParam::new()),
//! );
//! // Send the merchant to `redirect`; Shopify calls back with a query string.
//!
//! let token = client
//!     .exchange_code_for_token(&AuthQuery::parse(callback_query))
//!     .await?;
//! let orders = client.call("GET", "orders", RequestParams::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use shopify_client::{
//!     ApiKey, ApiPassword, ApiVersion, ClientConfig, Credentials, ShopDomain, ThrottleConfig,
//! };
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("foo.myshopify.com").unwrap())
//!     .credentials(Credentials::private(
//!         ApiKey::new("key").unwrap(),
//!         ApiPassword::new("password").unwrap(),
//!     ))
//!     .api_version(ApiVersion::V2021_07)
//!     .throttle(ThrottleConfig::new(0.9, Duration::from_secs(1), Duration::from_secs(2)).unwrap())
//!     .max_tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_tries(), 3);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: requests and responses at `debug`,
//! throttle delays and deprecation notices at `warn`. Install any
//! `tracing` subscriber to see them. URLs are logged with credentials
//! redacted.
//!
//! ## Thread Safety
//!
//! Clients, configuration and errors are `Send + Sync`. Calls take
//! `&mut self` because each client tracks its own pagination cursors and
//! throttle state.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

pub use auth::AuthScopes;
pub use clients::{
    private_app, public_app, storefront_app, ApiCallLimit, ApiClient, ApiError, PaginationInfo,
    PrivateClient, PublicClient, RequestParams,
};
pub use config::{
    AccessToken, ApiFlavor, ApiKey, ApiPassword, ApiSecretKey, ApiVersion, ClientConfig,
    ClientConfigBuilder, Credentials, HostUrl, ShopDomain, ThrottleConfig,
};
pub use error::{ConfigError, Error, ErrorKind};

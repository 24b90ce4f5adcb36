//! HTTP client types for Shopify API communication.
//!
//! # Overview
//!
//! - [`ApiClient`]: The capability shared by both client variants
//! - [`PrivateClient`]: Pre-authorized private apps (key + password)
//! - [`PublicClient`]: OAuth-delegated public apps
//! - [`RequestExecutor`]: Sends requests, applying throttling, pagination
//!   tracking and error mapping
//! - [`RateLimitGovernor`]: Client-side delay when the call bucket fills up
//! - [`Transport`]: The HTTP seam, implemented by [`ReqwestTransport`]
//! - [`url`]: URL templates and their placeholders
//!
//! # Request lifecycle
//!
//! 1. The method string is validated (GET, POST, PUT, DELETE, any case).
//! 2. The REST URL is rendered from the configuration and resource.
//! 3. If the previous response left the governor throttled, the call waits.
//! 4. GET and DELETE send params as a query string; POST and PUT as JSON.
//! 5. The call-limit header updates the governor; a `Link` header on a GET
//!    replaces the pagination cursors.
//! 6. Non-2xx responses become [`ApiError`] carrying the status code.
//!
//! # Retry Behavior
//!
//! A `429` response is retried only when
//! [`max_tries`](crate::ClientConfigBuilder::max_tries) is above 1, waiting
//! for `Retry-After` seconds or [`RETRY_WAIT_TIME`]. Every other failure is
//! returned immediately.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::clients::{parse_link, ApiCallLimit};
//!
//! let link = r#"<https://foo.myshopify.com/admin/api/2021-07/products.json?page_info=abc>; rel="next""#;
//! assert_eq!(parse_link(link, "next").as_deref(), Some("abc"));
//!
//! let limit = ApiCallLimit::parse("32/40").unwrap();
//! assert!((limit.ratio() - 0.8).abs() < f64::EPSILON);
//! ```

mod api_client;
mod errors;
mod executor;
mod headers;
mod http_request;
mod http_response;
mod private;
mod public;
mod throttle;
mod transport;
pub mod url;

pub use api_client::ApiClient;
pub use errors::ApiError;
pub use executor::{RequestExecutor, RETRY_WAIT_TIME};
pub use headers::{
    ClientHeaders, HeaderSet, ACCESS_TOKEN_HEADER, CONTENT_TYPE, GRAPHQL_COST_HEADER,
    STOREFRONT_ACCESS_TOKEN_HEADER,
};
pub use http_request::{HttpMethod, RequestDescriptor, RequestParams};
pub use http_response::{
    parse_link, ApiCallLimit, PaginationInfo, CALL_LIMIT_HEADER, DEPRECATED_REASON_HEADER,
    LINK_HEADER, REQUEST_ID_HEADER, RETRY_AFTER_HEADER,
};
pub use private::{private_app, storefront_app, PrivateClient};
pub use public::{public_app, PublicClient};
pub use throttle::RateLimitGovernor;
pub use transport::{
    Payload, ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
    SDK_VERSION,
};

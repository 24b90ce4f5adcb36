//! The capability shared by private and public clients.

use std::future::Future;

use serde_json::Value;

use crate::clients::executor::RequestExecutor;
use crate::clients::headers::ClientHeaders;
use crate::clients::http_request::{RequestDescriptor, RequestParams};
use crate::clients::http_response::{ApiCallLimit, PaginationInfo};
use crate::clients::transport::Transport;
use crate::clients::url::{graphql_url, rest_url};
use crate::config::ClientConfig;
use crate::error::Error;

/// Calls the Shopify REST and GraphQL APIs for one shop.
///
/// Implemented by [`PrivateClient`](crate::PrivateClient) and
/// [`PublicClient`](crate::PublicClient).
///
/// Calls take `&mut self`: a client carries pagination cursors and
/// rate-limit state, so one instance serves one caller at a time. Wrap it
/// in a `tokio::sync::Mutex` to share it.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_client::{ApiClient, RequestParams};
///
/// async fn list_all_products(client: &mut impl ApiClient) -> Result<(), shopify_client::Error> {
///     let mut params = RequestParams::new().with("limit", 50);
///     loop {
///         let page = client.call("GET", "products", params).await?;
///         println!("{}", page["products"]);
///
///         let Some(cursor) = client.next_page() else { break };
///         params = RequestParams::new().with("limit", 50).with("page_info", cursor);
///     }
///     Ok(())
/// }
/// ```
pub trait ApiClient: Send {
    /// Returns the client's configuration.
    fn config(&self) -> &ClientConfig;

    /// Calls a REST resource and returns the decoded JSON body.
    ///
    /// `method` is one of GET, POST, PUT or DELETE (any case). `resource` is
    /// the path under the versioned API root without the `.json` suffix,
    /// e.g. `products` or `orders/450789469`; `access_scopes` is served from
    /// the OAuth path.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMethod`] before any network I/O for other verbs
    /// - [`Error::Api`] for transport failures and non-2xx responses
    fn call(
        &mut self,
        method: &str,
        resource: &str,
        params: RequestParams,
    ) -> impl Future<Output = Result<Value, Error>> + Send;

    /// Posts a GraphQL document and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for transport failures, non-2xx responses and
    /// for 200 responses whose body carries `errors` (status code 400).
    fn call_graphql(&mut self, query: &str) -> impl Future<Output = Result<Value, Error>> + Send;

    /// Returns the cursors parsed from the last GET response.
    fn pagination(&self) -> &PaginationInfo;

    /// Returns `true` if the next REST call will be delayed.
    fn is_throttled(&self) -> bool;

    /// Returns the last call limit reported by the platform.
    fn last_call_limit(&self) -> Option<ApiCallLimit>;

    /// Returns the next-page cursor, if any.
    fn next_page(&self) -> Option<&str> {
        self.pagination().next_page_info.as_deref()
    }

    /// Returns the previous-page cursor, if any.
    fn prev_page(&self) -> Option<&str> {
        self.pagination().prev_page_info.as_deref()
    }

    /// Returns `true` if a next page exists.
    fn has_next_page(&self) -> bool {
        self.next_page().is_some()
    }

    /// Returns `true` if a previous page exists.
    fn has_prev_page(&self) -> bool {
        self.prev_page().is_some()
    }
}

/// State and behavior common to both client variants.
#[derive(Debug)]
pub(crate) struct ClientCore<T> {
    pub(crate) config: ClientConfig,
    pub(crate) headers: ClientHeaders,
    pub(crate) executor: RequestExecutor<T>,
}

impl<T: Transport> ClientCore<T> {
    pub(crate) fn new(config: ClientConfig, headers: ClientHeaders, transport: T) -> Self {
        let executor = RequestExecutor::new(transport, &config);
        Self {
            config,
            headers,
            executor,
        }
    }

    pub(crate) async fn call(
        &mut self,
        method: &str,
        resource: &str,
        params: RequestParams,
    ) -> Result<Value, Error> {
        let descriptor = RequestDescriptor::new(method, resource, params)?;
        let url = rest_url(&self.config, &descriptor.resource);
        self.executor
            .execute_rest(descriptor, url, self.headers.rest())
            .await
    }

    pub(crate) async fn call_graphql(&mut self, query: &str) -> Result<Value, Error> {
        let url = graphql_url(&self.config);
        self.executor
            .execute_graphql(url, self.headers.graphql(), query)
            .await
    }
}

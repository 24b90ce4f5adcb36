//! Request execution shared by every client variant.
//!
//! [`RequestExecutor`] owns the per-client mutable state: pagination
//! cursors and the rate-limit governor. It turns a resolved call into a
//! [`TransportRequest`], runs it through the transport and maps every
//! failure into an [`ApiError`].

use std::time::Duration;

use serde_json::{Map, Value};

use crate::clients::errors::ApiError;
use crate::clients::headers::HeaderSet;
use crate::clients::http_request::{HttpMethod, RequestDescriptor};
use crate::clients::http_response::{
    ApiCallLimit, PaginationInfo, CALL_LIMIT_HEADER, DEPRECATED_REASON_HEADER, LINK_HEADER,
    REQUEST_ID_HEADER, RETRY_AFTER_HEADER,
};
use crate::clients::throttle::RateLimitGovernor;
use crate::clients::transport::{Payload, Transport, TransportRequest, TransportResponse};
use crate::clients::url::redact;
use crate::config::ClientConfig;
use crate::error::Error;

/// Fixed wait before retrying a 429 without a `Retry-After` header.
pub const RETRY_WAIT_TIME: Duration = Duration::from_secs(1);

/// Executes REST and GraphQL calls for one client instance.
#[derive(Debug)]
pub struct RequestExecutor<T> {
    transport: T,
    governor: RateLimitGovernor,
    pagination: PaginationInfo,
    max_tries: u32,
}

impl<T: Transport> RequestExecutor<T> {
    /// Creates an executor sending through `transport`.
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            governor: RateLimitGovernor::new(*config.throttle()),
            pagination: PaginationInfo::default(),
            max_tries: config.max_tries(),
        }
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the cursors from the last GET.
    pub const fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    /// Returns `true` if the next governed call will be delayed.
    pub const fn is_throttled(&self) -> bool {
        self.governor.is_throttled()
    }

    /// Returns the last observed call limit.
    pub const fn last_call_limit(&self) -> Option<ApiCallLimit> {
        self.governor.last_call_limit()
    }

    /// Runs a REST call against `url` and returns the decoded body.
    ///
    /// GET and DELETE parameters go in the query string, POST and PUT
    /// parameters in a JSON body. A successful GET replaces the pagination
    /// cursors with those of its `Link` header, clearing them when there is
    /// none.
    pub async fn execute_rest(
        &mut self,
        descriptor: RequestDescriptor,
        url: String,
        headers: &HeaderSet,
    ) -> Result<Value, Error> {
        let RequestDescriptor { method, params, .. } = descriptor;
        let payload = if method.sends_query() {
            if params.is_empty() {
                Payload::Empty
            } else {
                Payload::Query(params.to_query_pairs())
            }
        } else {
            Payload::Json(params.to_json())
        };

        self.governor.wait().await;

        let request = TransportRequest {
            method,
            url,
            headers: to_pairs(headers),
            payload,
        };
        let response = self.send(request, true).await?;

        if method == HttpMethod::Get {
            self.pagination = response
                .header(LINK_HEADER)
                .map(PaginationInfo::parse_link_header)
                .unwrap_or_default();
        }

        Ok(decode_body(&response)?)
    }

    /// Runs a GraphQL query against `url` and returns the decoded body.
    ///
    /// A response whose body carries an `errors` field fails with a 400
    /// [`ApiError`] even though the HTTP exchange succeeded.
    pub async fn execute_graphql(
        &mut self,
        url: String,
        headers: &HeaderSet,
        query: &str,
    ) -> Result<Value, Error> {
        let governed = self.governor.applies_to_graphql();
        if governed {
            self.governor.wait().await;
        }

        let request = TransportRequest {
            method: HttpMethod::Post,
            url,
            headers: to_pairs(headers),
            payload: Payload::Body(query.to_string()),
        };
        let response = self.send(request, governed).await?;

        let body = decode_body(&response)?;
        if let Some(errors) = body.get("errors") {
            return Err(ApiError::graphql(
                errors,
                response.header(REQUEST_ID_HEADER).map(String::from),
            )
            .into());
        }
        Ok(body)
    }

    /// Sends a request outside the governor, e.g. for the OAuth token
    /// exchange, and returns the successful response.
    pub async fn execute_unmetered(
        &mut self,
        request: TransportRequest,
    ) -> Result<TransportResponse, Error> {
        Ok(self.send(request, false).await?)
    }

    async fn send(
        &mut self,
        request: TransportRequest,
        observe_limits: bool,
    ) -> Result<TransportResponse, ApiError> {
        let method = request.method;
        let redacted_url = redact(&request.url);
        let mut tries: u32 = 0;

        loop {
            tries += 1;
            tracing::debug!(%method, url = %redacted_url, tries, "Sending Shopify API request");

            let response = match self.transport.send(request.clone()).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(%method, url = %redacted_url, error = %e, "Transport failure");
                    return Err(match &e.response {
                        Some(response) => ApiError::from_response(response, Some(&e.message)),
                        None => ApiError::transport(e.message),
                    });
                }
            };

            if observe_limits {
                self.governor.observe_header(response.header(CALL_LIMIT_HEADER));
            }

            if let Some(reason) = response.header(DEPRECATED_REASON_HEADER) {
                tracing::warn!(
                    "Deprecated request to Shopify API at {}, received reason: {}",
                    redacted_url,
                    reason
                );
            }

            if response.is_success() {
                return Ok(response);
            }

            if response.status == 429 && tries < self.max_tries {
                let delay = retry_delay(&response);
                tracing::debug!(
                    url = %redacted_url,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(ApiError::from_response(&response, None));
        }
    }
}

fn to_pairs(headers: &HeaderSet) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn retry_delay(response: &TransportResponse) -> Duration {
    response
        .header(RETRY_AFTER_HEADER)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map_or(RETRY_WAIT_TIME, Duration::from_secs_f64)
}

/// Decodes a JSON response body; an empty body decodes to `{}`.
pub(crate) fn decode_body(response: &TransportResponse) -> Result<Value, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError {
        code: response.status,
        message: format!("Invalid JSON in response body: {e}"),
        detail: None,
        error_reference: response.header(REQUEST_ID_HEADER).map(String::from),
    })
}

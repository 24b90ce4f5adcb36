//! Errors reported by the remote endpoint.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::http_response::REQUEST_ID_HEADER;
use crate::clients::transport::TransportResponse;

/// A failure surfaced by the Shopify API or the transport beneath it.
///
/// `code` is the HTTP status, `400` for GraphQL payload errors, and `0` when
/// no response was received. `message` is the serialized provider error
/// payload when one was present, otherwise the transport's own text.
///
/// # Example
///
/// ```rust
/// use shopify_client::ApiError;
/// use serde_json::json;
///
/// let error = ApiError::graphql(&json!([{"message": "Field 'x' doesn't exist"}]), None);
/// assert_eq!(error.code, 400);
/// assert!(error.message.contains("Field 'x' doesn't exist"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code, or 0 when no response was available.
    pub code: u16,
    /// Human-readable error text.
    pub message: String,
    /// The structured provider payload, when the response carried one.
    pub detail: Option<Value>,
    /// The `X-Request-Id` of the failed response.
    pub error_reference: Option<String>,
}

impl ApiError {
    /// Builds an error from a non-success response.
    ///
    /// The provider payload is taken from the body's `errors` field, or from
    /// `error` and `error_description` for OAuth endpoints. Without either,
    /// `fallback` is used, and without that, a message naming the status.
    #[must_use]
    pub fn from_response(response: &TransportResponse, fallback: Option<&str>) -> Self {
        let detail = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| extract_payload(&body));

        let message = match (&detail, fallback) {
            (Some(Value::String(text)), _) => text.clone(),
            (Some(payload), _) => payload.to_string(),
            (None, Some(text)) => text.to_string(),
            (None, None) => status_message(response),
        };

        Self {
            code: response.status,
            message,
            detail,
            error_reference: response.header(REQUEST_ID_HEADER).map(String::from),
        }
    }

    /// Builds the error for a successful GraphQL response carrying `errors`.
    #[must_use]
    pub fn graphql(errors: &Value, error_reference: Option<String>) -> Self {
        Self {
            code: 400,
            message: errors.to_string(),
            detail: Some(errors.clone()),
            error_reference,
        }
    }

    /// Builds an error for a failure that produced no response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: message.into(),
            detail: None,
            error_reference: None,
        }
    }
}

fn extract_payload(body: &Value) -> Option<Value> {
    if let Some(errors) = body.get("errors") {
        return Some(errors.clone());
    }

    let error = body.get("error")?;
    let mut payload = Map::new();
    payload.insert("error".to_string(), error.clone());
    if let Some(description) = body.get("error_description") {
        payload.insert("error_description".to_string(), description.clone());
    }
    Some(Value::Object(payload))
}

fn status_message(response: &TransportResponse) -> String {
    let body = response.body.trim();
    if body.is_empty() {
        format!("Request failed with status {}", response.status)
    } else {
        format!("Request failed with status {}: {body}", response.status)
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

//! REST request description.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::Error;

/// HTTP methods accepted by [`ApiClient::call`](crate::ApiClient::call).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if parameters travel in the query string rather than
    /// a JSON body.
    #[must_use]
    pub const fn sends_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    /// Parses a method name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] for anything other than GET, POST,
    /// PUT or DELETE.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(Error::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Parameters of a REST call, keyed by unique name.
///
/// Values are arbitrary JSON. GET and DELETE flatten them into the query
/// string: arrays become repeated `key[]` pairs, objects become `key[sub]`
/// pairs and nulls are dropped. POST and PUT send them as a JSON object.
///
/// # Example
///
/// ```rust
/// use shopify_client::RequestParams;
/// use serde_json::json;
///
/// let params = RequestParams::new()
///     .with("ids", json!([1, 2]))
///     .with("limit", 50);
///
/// assert_eq!(
///     params.to_query_pairs(),
///     vec![
///         ("ids[]".to_string(), "1".to_string()),
///         ("ids[]".to_string(), "2".to_string()),
///         ("limit".to_string(), "50".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestParams(Map<String, Value>);

impl RequestParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the parameters into query string pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            flatten_into(key.clone(), value, &mut pairs);
        }
        pairs
    }

    /// Returns the parameters as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for RequestParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn flatten_into(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for item in items {
                flatten_into(format!("{key}[]"), item, pairs);
            }
        }
        Value::Object(fields) => {
            for (sub, item) in fields {
                flatten_into(format!("{key}[{sub}]"), item, pairs);
            }
        }
    }
}

/// A validated REST call: method, target resource and parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Resource path relative to the versioned API root, e.g. `products/1`.
    pub resource: String,
    /// Call parameters.
    pub params: RequestParams,
}

impl RequestDescriptor {
    /// Validates `method` and assembles a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] if `method` is not GET, POST, PUT or
    /// DELETE.
    pub fn new(
        method: &str,
        resource: impl Into<String>,
        params: RequestParams,
    ) -> Result<Self, Error> {
        Ok(Self {
            method: method.parse()?,
            resource: resource.into(),
            params,
        })
    }
}

//! Request options and response values for `Client::fetch`.

use std::collections::BTreeMap;

use fapi_core::ApiError;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result};

/// Request payload.
///
/// `Raw` bytes are sent exactly as given, so pre-encoded JSON is never
/// encoded twice. `Json` values are serialized when the request is built;
/// `Body::json` encodes eagerly so struct fields keep their declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Raw(Vec<u8>),
    Json(serde_json::Value),
}

impl Body {
    /// Serialize any value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_vec(value)
            .map(Body::Raw)
            .map_err(ClientError::Serialize)
    }

    pub(crate) fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Body::Empty => Ok(Vec::new()),
            Body::Raw(bytes) => Ok(bytes),
            Body::Json(value) => serde_json::to_vec(&value).map_err(ClientError::Serialize),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Raw(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Raw(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

/// Describes one call made through `Client::fetch`.
#[derive(Debug, Clone, Default)]
pub struct FetchOpts {
    /// Joined onto the base URL path segment by segment.
    pub path: String,
    /// Appended after any query already present on the base URL.
    pub query: BTreeMap<String, String>,
    /// `GET` when unset.
    pub method: Option<Method>,
    pub body: Body,
    /// Replace the client's default values for the same header names.
    pub headers: HeaderMap,
}

impl FetchOpts {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Outcome of `Client::fetch`. The body is always kept; `api_error` is set
/// only for statuses outside 200..300.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub data: Vec<u8>,
    pub api_error: Option<ApiError>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Decode the raw body into `T`, whatever the status was.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.data).map_err(ClientError::Decode)
    }
}

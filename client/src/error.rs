//! Error types for the fetch client.
//!
//! # Design
//! Failures are split by where they happen: building the request
//! (`Url`, `Header`, `Serialize`), the network call (`Transport`), and reading
//! the response (`Decode`). An unsuccessful HTTP status is not an error of
//! `fetch`; it is reported through `ApiResponse::api_error`. Only
//! `Client::perform_checked` turns it into `Api`.

use fapi_core::ApiError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by `Client` operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid URL: {0}")]
    Url(String),

    /// A default header or bearer token is not a valid header value.
    #[error("invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),

    /// The request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The network call itself failed.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {error}")]
    Api { status: u16, error: ApiError },
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Url(err.to_string())
    }
}

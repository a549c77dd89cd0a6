//! Synchronous, typed JSON API client.
//!
//! # Overview
//! `Client` turns a `FetchOpts` into an HTTP request, executes it through an
//! injected `Transport` and classifies the response. Error bodies are decoded
//! into `fapi_core::ApiError`, the same shape `fapi-server` writes.
//!
//! # Design
//! - The transport is a trait object boundary, not global state. Production
//!   code passes a `UreqTransport`; tests pass fakes.
//! - `Client` is immutable after construction and safe to share.
//! - Bodies are a tagged union (`Body::{Empty, Raw, Json}`) so pre-encoded
//!   bytes are never encoded twice.
//! - A non-2xx status is data (`ApiResponse::api_error`), not an `Err`.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_response, Client, ClientOpts};
pub use error::{BoxError, ClientError, Result};
pub use fapi_core::{ApiError, FieldError, FieldErrorsMap, ResponseBody};
pub use self::http::{HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{ApiResponse, Body, FetchOpts};

//! HTTP transport types for the injected-transport pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! client builds an `HttpRequest`, hands it to a `Transport`, and classifies
//! the `HttpResponse` it gets back. Keeping I/O behind a trait lets tests
//! substitute a fake transport and keeps the client free of global state.
//!
//! All fields use owned types so values can be recorded and compared.

use http::{HeaderMap, Method};

use crate::error::BoxError;

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// An HTTP response described as plain data, body fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok`; only failures of
/// the network call itself (DNS, connect, timeout, broken body) are `Err`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).execute(request)
    }
}

//! Generic JSON fetch client.
//!
//! # Design
//! `Client` holds an immutable base URL, default headers and a transport.
//! `fetch` is split into `build_request`, which produces an `HttpRequest`
//! without touching the network, the transport round-trip, and
//! `parse_response`, which classifies an `HttpResponse`. Every value the
//! client carries is read-only after `Client::new`, so one client can be
//! shared across threads.

use std::collections::BTreeMap;

use fapi_core::ApiError;
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{ApiResponse, FetchOpts};

/// Construction inputs for `Client`.
#[derive(Debug, Clone, Default)]
pub struct ClientOpts {
    pub base_url: String,
    /// Replace the `Content-Type: application/json` default per header name.
    pub headers: HeaderMap,
    /// Appended as `Authorization: Bearer <token>`. Do not also pass an
    /// `Authorization` header, or both values are sent.
    pub bearer_token: Option<String>,
}

/// Synchronous client for a JSON API rooted at one base URL.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    base_url: Url,
    headers: HeaderMap,
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(opts: ClientOpts, transport: T) -> Result<Self> {
        let base_url = Url::parse(&opts.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(format!(
                "{base_url} cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        merge_headers(&mut headers, &opts.headers);

        if let Some(token) = opts.bearer_token.as_deref().filter(|t| !t.is_empty()) {
            headers.append(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }

        Ok(Self {
            base_url,
            headers,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers sent with every request unless overridden per call.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolve `opts` into a concrete request without performing it.
    pub fn build_request(&self, opts: FetchOpts) -> Result<HttpRequest> {
        let url = self.resolve_url(&opts.path, &opts.query)?;
        let body = opts.body.into_bytes()?;

        let mut headers = self.headers.clone();
        merge_headers(&mut headers, &opts.headers);

        Ok(HttpRequest {
            method: opts.method.unwrap_or(Method::GET),
            url: url.into(),
            headers,
            body,
        })
    }

    /// Perform one request and classify the response.
    ///
    /// A non-2xx status is not an error here: it comes back with
    /// `api_error` decoded from the body. The call fails when the request
    /// cannot be built, the transport fails, or an error body is not a
    /// valid API error.
    pub fn fetch(&self, opts: FetchOpts) -> Result<ApiResponse> {
        let request = self.build_request(opts)?;
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self
            .transport
            .execute(request)
            .map_err(ClientError::Transport)?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );

        parse_response(response)
    }

    /// Fetch and decode the body into `R`.
    ///
    /// The body is decoded whatever the status was. Use `perform_checked`
    /// when an error response must not be mistaken for a result.
    pub fn perform<R: DeserializeOwned>(&self, opts: FetchOpts) -> Result<R> {
        self.fetch(opts)?.json()
    }

    /// Like `perform`, but returns `ClientError::Api` for non-2xx statuses.
    pub fn perform_checked<R: DeserializeOwned>(&self, opts: FetchOpts) -> Result<R> {
        let response = self.fetch(opts)?;
        if let Some(error) = response.api_error {
            return Err(ClientError::Api {
                status: response.status_code,
                error,
            });
        }
        response.json()
    }

    fn resolve_url(&self, path: &str, query: &BTreeMap<String, String>) -> Result<Url> {
        let mut url = self.base_url.clone();
        join_path(&mut url, path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Classify a raw response. Success is any status in 200..300.
pub fn parse_response(response: HttpResponse) -> Result<ApiResponse> {
    let mut api_response = ApiResponse {
        status_code: response.status,
        data: response.body,
        api_error: None,
    };
    if !api_response.is_success() {
        api_response.api_error = Some(decode_error(&api_response.data)?);
    }
    Ok(api_response)
}

/// Error bodies arrive either wrapped as `{"error": {...}}` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Enveloped { error: ApiError },
    Bare(ApiError),
}

fn decode_error(body: &[u8]) -> Result<ApiError> {
    let body: ErrorBody = serde_json::from_slice(body).map_err(ClientError::Decode)?;
    Ok(match body {
        ErrorBody::Enveloped { error } | ErrorBody::Bare(error) => error,
    })
}

/// Copy `overrides` into `headers`, replacing all values of each name.
fn merge_headers(headers: &mut HeaderMap, overrides: &HeaderMap) {
    for name in overrides.keys() {
        headers.remove(name);
        for value in overrides.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
}

/// Append `path` to the URL path one segment at a time. Each segment is
/// percent-encoded, `.` is dropped, `..` removes the previous segment and a
/// trailing slash on `path` is kept.
fn join_path(url: &mut Url, path: &str) -> Result<()> {
    let mut segments = url
        .path_segments_mut()
        .map_err(|()| ClientError::Url("base URL cannot carry a path".to_string()))?;
    segments.pop_if_empty();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => {
                segments.push(segment);
            }
        }
    }
    if path.ends_with('/') {
        segments.push("");
    }
    Ok(())
}

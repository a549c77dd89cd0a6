//! Blocking `Transport` backed by a `ureq` agent.

use std::time::Duration;

use http::Request;
use ureq::Agent;

use crate::error::BoxError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Production transport. Construct once and share; the agent pools
/// connections internally.
///
/// Response bodies are read to the end with no size cap unless one is set
/// with `with_body_limit`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::from_agent(config(None))
    }

    /// Transport whose calls fail once `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_agent(config(Some(timeout)))
    }

    /// Fail a call whose response body is longer than `limit` bytes.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }

    fn from_agent(agent: Agent) -> Self {
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and the client does the classification.
fn config(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = Request::builder()
            .method(request.method)
            .uri(request.url.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers);
        }

        let mut response = if request.body.is_empty() {
            self.agent.run(builder.body(())?)?
        } else {
            self.agent.run(builder.body(request.body.as_slice())?)?
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

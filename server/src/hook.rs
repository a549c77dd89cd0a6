//! Terminal error dispatch for a request.
//!
//! `dispatch_errors` wraps the handler chain. Handlers record failures
//! through the `ErrorLog` extractor and/or return `Err(Failure)`; once the
//! chain completes every failure is translated, each `ServerError` is logged
//! with its private message, and the last one becomes the response.
//!
//! Extractor rejections are normalized only when their type is `Failure`
//! (as with `ValidatedJson`); other axum rejections pass through as-is.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/todos", get(list_todos))
//!     .layer(axum::middleware::from_fn(dispatch_errors));
//! ```

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use fapi_core::ResponseError;
use tracing::error;

use crate::envelope::error_response;
use crate::error::{Failure, RaisedError};
use crate::translate::translate;

/// Failures recorded while handling one request, in the order raised.
///
/// Cloning shares the log. Outside `dispatch_errors` the extractor hands out
/// a detached log whose entries are never reported.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog(Arc<Mutex<Vec<Failure>>>);

impl ErrorLog {
    pub fn record(&self, failure: impl Into<Failure>) {
        self.lock().push(failure.into());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn take(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Failure>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ErrorLog {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<ErrorLog>().cloned().unwrap_or_default())
    }
}

/// Middleware: run the rest of the chain, then report the last failure.
///
/// With no recorded failure the handler's response is returned untouched.
pub async fn dispatch_errors(mut request: Request, next: Next) -> Response {
    let errors = ErrorLog::default();
    request.extensions_mut().insert(errors.clone());

    let mut response = next.run(request).await;
    if let Some(RaisedError(err)) = response.extensions_mut().remove::<RaisedError>() {
        errors.record(err);
    }

    match resolve(errors.take()) {
        Some(err) => error_response(&err),
        None => response,
    }
}

/// Translate every failure, log the server-class ones, keep the last.
pub fn resolve(failures: impl IntoIterator<Item = Failure>) -> Option<ResponseError> {
    failures.into_iter().map(translate).inspect(log_error).last()
}

/// Log `err` internally if it is a `ServerError`. Other families are the
/// client's concern and are not logged.
pub fn log_error(err: &ResponseError) {
    if !err.is_server_error() {
        return;
    }
    error!(private_message = %err.private_message, "server error");
}

//! Server-side error normalization for axum JSON APIs.
//!
//! # Overview
//! Handlers raise `Failure`s; `translate` maps each one to the canonical
//! `fapi_core::ResponseError`; the `dispatch_errors` middleware logs every
//! server-class error and writes the last one through the envelope.
//! Success responses go through `Envelope::respond` / `respond_ok`.
//!
//! # Design
//! - `Failure` is a closed enum; translation is an exhaustive match.
//! - `ErrorLog` is a per-request extension, so a handler can record several
//!   failures. A returned `Err(Failure)` counts as the last one.
//! - Only the `ServerError` family is logged, and only its private message.

pub mod envelope;
pub mod error;
pub mod extract;
pub mod hook;
pub mod translate;

pub use envelope::{error_response, Envelope};
pub use error::{BoxError, Failure};
pub use extract::ValidatedJson;
pub use fapi_core::{ErrorName, FieldError, FieldErrorsMap, ResponseError};
pub use hook::{dispatch_errors, log_error, resolve, ErrorLog};
pub use translate::translate;

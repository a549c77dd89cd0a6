//! Canonical error model and wire DTOs for fapi JSON APIs.
//!
//! # Overview
//! Servers build `ResponseError` values through one constructor per error
//! family and write them inside a `ResponseBody`. Clients decode the same
//! bytes into `ApiError`. Both halves live here so the wire contract has a
//! single definition.
//!
//! # Design
//! - `status` and `private_message` are `#[serde(skip)]`: they drive the HTTP
//!   status line and internal logs but never reach a client.
//! - `ErrorName` is a closed set; `ApiError::name` stays a string so older
//!   clients tolerate new families.
//! - Field-level violations are a `FieldErrorsMap` attached as error data.

pub mod error;
pub mod types;

pub use error::{ErrorData, ErrorName, ResponseError, FIELD_ERRORS_CODE};
pub use types::{ApiError, FieldError, FieldErrorsMap, ResponseBody};

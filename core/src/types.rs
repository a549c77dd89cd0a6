//! Wire DTOs shared by servers and clients.
//!
//! # Design
//! `ApiError` is what a client decodes: the public projection of
//! `ResponseError` with `name` kept as a plain string so that clients keep
//! working when a server adds a family. `ResponseBody` is the `{data, error}`
//! envelope; it is generic over the error type so the server writes it with
//! `ResponseError` and clients read it with `ApiError`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorData, ResponseError, FIELD_ERRORS_CODE};

/// A single violated rule on an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: None,
        }
    }

    /// Field error whose code and message are both the rule's tag.
    pub fn from_tag(tag: &str) -> Self {
        Self {
            code: tag.to_string(),
            message: Some(tag.to_string()),
        }
    }
}

/// Field name to the violations recorded on it, in evaluation order.
pub type FieldErrorsMap = BTreeMap<String, Vec<FieldError>>;

/// An error as received by an API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{name} ({code}): {message}")]
pub struct ApiError {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Field errors carried by a `field_errors` validation error.
    ///
    /// Returns `None` for any other code or when `data` has another shape.
    pub fn field_errors(&self) -> Option<FieldErrorsMap> {
        if self.code != FIELD_ERRORS_CODE {
            return None;
        }
        let data = self.data.clone()?;
        serde_json::from_value(data).ok()
    }
}

impl From<ResponseError> for ApiError {
    fn from(err: ResponseError) -> Self {
        let data = err.data.map(|data| match data {
            ErrorData::FieldErrors(fields) => serde_json::to_value(fields).unwrap_or_default(),
            ErrorData::Value(value) => value,
        });
        Self {
            name: err.name.to_string(),
            code: err.code,
            message: err.message,
            data,
        }
    }
}

/// `{"data": ..., "error": ...}` envelope. Unset sides are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody<T, E = ApiError> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<E>,
}

impl<T, E> ResponseBody<T, E> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: E) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }
}

//! Canonical error shape shared by the server pipeline and API clients.
//!
//! # Design
//! `ResponseError` carries everything the server knows about a failure. Only
//! `name`, `code`, `message` and `data` are serialized; `status` decides the
//! HTTP status line and `private_message` is kept for internal logs. Every
//! family has exactly one constructor so codes stay stable across releases.

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::types::FieldErrorsMap;

/// Code used by `ResponseError::validation_with_field_errors`.
pub const FIELD_ERRORS_CODE: &str = "field_errors";

/// Error family. Clients branch on `code`; `name` groups codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorName {
    ServerError,
    ParseError,
    ResourceNotFoundError,
    ValidationError,
}

impl ErrorName {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorName::ServerError => "ServerError",
            ErrorName::ParseError => "ParseError",
            ErrorName::ResourceNotFoundError => "ResourceNotFoundError",
            ErrorName::ValidationError => "ValidationError",
        }
    }
}

impl fmt::Display for ErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload attached to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorData {
    FieldErrors(FieldErrorsMap),
    Value(serde_json::Value),
}

/// A failure in the canonical shape, ready to be written to a client.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ResponseError {
    #[serde(skip)]
    pub status: StatusCode,
    pub name: ErrorName,
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Diagnostic detail for operators. Never leaves the process.
    #[serde(skip)]
    pub private_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

impl ResponseError {
    /// Unexpected internal failure. The client sees only the family and code;
    /// the cause is kept in `private_message`.
    pub fn server_error(cause: impl fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            name: ErrorName::ServerError,
            code: "server_error".to_string(),
            message: String::new(),
            private_message: cause.to_string(),
            data: None,
        }
    }

    /// Input that is well-formed but cannot be interpreted.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            name: ErrorName::ParseError,
            code: "parse_error".to_string(),
            message: message.into(),
            private_message: String::new(),
            data: None,
        }
    }

    /// `resource_not_found("order")` yields code `order_not_found` and
    /// message `order not found`.
    pub fn resource_not_found(resource: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            name: ErrorName::ResourceNotFoundError,
            code: format!("{resource}_not_found"),
            message: format!("{resource} not found"),
            private_message: String::new(),
            data: None,
        }
    }

    pub fn validation_error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            name: ErrorName::ValidationError,
            code: code.into(),
            message: message.into(),
            private_message: String::new(),
            data: None,
        }
    }

    /// Several field-level violations reported at once.
    pub fn validation_with_field_errors(fields: FieldErrorsMap) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            name: ErrorName::ValidationError,
            code: FIELD_ERRORS_CODE.to_string(),
            message: "errors in fields".to_string(),
            private_message: String::new(),
            data: Some(ErrorData::FieldErrors(fields)),
        }
    }

    /// Attach an arbitrary JSON payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(ErrorData::Value(data));
        self
    }

    pub fn is_server_error(&self) -> bool {
        self.name == ErrorName::ServerError
    }
}

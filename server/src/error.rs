//! Failures raised by request handlers.
//!
//! # Design
//! Handlers never build wire errors ad hoc for unexpected conditions; they
//! raise a `Failure` and let `translate` decide what the client sees. The
//! set of kinds is closed so translation is an exhaustive `match`.

use axum::response::{IntoResponse, Response};
use fapi_core::ResponseError;
use serde_json::error::Category;
use validator::ValidationErrors;

use crate::envelope::error_response;
use crate::translate::translate;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure raised while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Already in canonical shape.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The request body is not valid JSON at all.
    #[error("malformed JSON body: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The body decoded but broke one or more field rules.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Anything else.
    #[error("{0}")]
    Internal(#[source] BoxError),
}

impl Failure {
    pub fn internal(err: impl Into<BoxError>) -> Self {
        Failure::Internal(err.into())
    }
}

/// Syntax and truncation errors are `Syntax`; a well-formed document of the
/// wrong shape is `Internal`.
impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Eof => Failure::Syntax(err),
            Category::Data | Category::Io => Failure::internal(err),
        }
    }
}

/// Translated error attached to a response so `dispatch_errors` can treat a
/// returned `Err` as the last recorded failure.
#[derive(Debug, Clone)]
pub(crate) struct RaisedError(pub(crate) ResponseError);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let err = translate(self);
        let mut response = error_response(&err);
        response.extensions_mut().insert(RaisedError(err));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_syntax_errors_are_syntax_failures() {
        let err = serde_json::from_str::<serde_json::Value>("{\"title\": ").unwrap_err();
        assert!(matches!(Failure::from(err), Failure::Syntax(_)));

        let err = serde_json::from_str::<serde_json::Value>("{title}").unwrap_err();
        assert!(matches!(Failure::from(err), Failure::Syntax(_)));
    }

    #[test]
    fn json_shape_errors_are_internal() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Input {
            title: String,
        }
        let err = serde_json::from_str::<Input>(r#"{"title": 5}"#).unwrap_err();
        assert!(matches!(Failure::from(err), Failure::Internal(_)));
    }

    #[test]
    fn display_of_response_failure_is_public_message() {
        let failure = Failure::from(ResponseError::resource_not_found("todo"));
        assert_eq!(failure.to_string(), "todo not found");
    }
}

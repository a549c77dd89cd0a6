//! Success and error response bodies.
//!
//! Two envelope variants exist; a deployment picks one and uses it for every
//! success response:
//!
//! | call           | `Bare`         | `Wrapped`                     |
//! |----------------|----------------|-------------------------------|
//! | `respond(d)`   | `d`            | `{"data": d}`                 |
//! | `respond_ok()` | empty body     | `{"data": {"result": "ok"}}`  |
//!
//! Errors are written only by `dispatch_errors` and look the same under both
//! variants: `{"error": {...}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fapi_core::{ResponseBody, ResponseError};
use serde::Serialize;

/// Success envelope variant. Parses from `"bare"` or `"wrapped"`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Envelope {
    Bare,
    #[default]
    Wrapped,
}

#[derive(Serialize)]
struct Affirmative {
    result: &'static str,
}

impl Envelope {
    /// 200 with `data` as the payload.
    pub fn respond<T: Serialize>(self, data: T) -> Response {
        match self {
            Envelope::Bare => (StatusCode::OK, Json(data)).into_response(),
            Envelope::Wrapped => (
                StatusCode::OK,
                Json(ResponseBody::<T, ResponseError>::data(data)),
            )
                .into_response(),
        }
    }

    /// 200 without a meaningful payload.
    pub fn respond_ok(self) -> Response {
        match self {
            Envelope::Bare => StatusCode::OK.into_response(),
            Envelope::Wrapped => self.respond(Affirmative { result: "ok" }),
        }
    }
}

/// `{"error": err}` at the error's own status.
pub fn error_response(err: &ResponseError) -> Response {
    (
        err.status,
        Json(ResponseBody::<(), ResponseError>::error(err.clone())),
    )
        .into_response()
}

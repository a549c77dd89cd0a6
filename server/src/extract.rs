//! JSON body extractor that also runs `validator` rules.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::Failure;

/// Like `axum::Json`, but rejects with a `Failure` so binding problems go
/// through the same translation as every other error:
/// a non-JSON body is `Failure::Syntax`, a JSON document of the wrong shape
/// is `Failure::Internal`, and broken field rules are `Failure::Validation`.
///
/// Only `Failure` rejections reach `dispatch_errors`. Stock extractors such
/// as `axum::Json`, `Query` or a typed `Path` answer with their own
/// plain-text rejection and bypass the envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(Failure::internal)?;
        let value: T = serde_json::from_slice(&bytes)?;
        value.validate()?;
        Ok(Self(value))
    }
}

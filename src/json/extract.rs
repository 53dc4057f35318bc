use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

use super::{JsonError, MAX_BODY_BYTES, decode_with_limit, parse_content_type};
use crate::error::ApiError;

/// Reads at most `limit` bytes of `body`.
///
/// Reading stops as soon as the limit is crossed, so an oversized upload is
/// never buffered in full.
pub async fn read_json_body(body: axum::body::Body, limit: usize) -> Result<Bytes, ApiError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(JsonError::TooLarge(limit).into())
        }
        Err(err) => Err(ApiError::Internal(format!("failed to read request body: {err}"))),
    }
}

/// Per-router body limit for [`StrictJson`], installed as a request extension:
///
/// ```ignore
/// Router::new().route("/items", post(create)).layer(Extension(BodyLimit(64 * 1024)))
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        Self(MAX_BODY_BYTES)
    }
}

/// JSON extractor that decodes like [`decode`](super::decode).
///
/// Unlike `axum::Json` it tolerates a missing `Content-Type`, enforces a
/// [`BodyLimit`] (default [`MAX_BODY_BYTES`]) and reports failures with the
/// decoder's messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson<T>(pub T);

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(value) = req.headers().get(CONTENT_TYPE) {
            let value = value
                .to_str()
                .map_err(|_| ApiError::BadRequest("invalid Content-Type header".into()))?;
            parse_content_type(value)?;
        }

        let BodyLimit(limit) = req.extensions().get::<BodyLimit>().copied().unwrap_or_default();

        let body = read_json_body(req.into_body(), limit).await?;
        let value = decode_with_limit(&body, limit)?;

        Ok(StrictJson(value))
    }
}

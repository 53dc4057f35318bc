use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::envelope::{Envelope, EnvelopeError};
use crate::json::JsonError;
use crate::params::ParamError;

/// HTTP-facing error for handlers built on these helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    InvalidParameter(#[from] ParamError),
    #[error("{0}")]
    InvalidPayload(JsonError),
    #[error("{0}")]
    PayloadTooLarge(JsonError),
    #[error("{0}")]
    UnsupportedMediaType(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidParameter(_) | ApiError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidParameter(_) => "INVALID_PARAMETER",
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<JsonError> for ApiError {
    fn from(value: JsonError) -> Self {
        match value {
            JsonError::TooLarge(_) => ApiError::PayloadTooLarge(value),
            other => ApiError::InvalidPayload(other),
        }
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(value: EnvelopeError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };

        match Envelope::new().with("error", body) {
            Ok(envelope) => (status, envelope).into_response(),
            Err(_) => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_map_to_status() {
        let too_large = ApiError::from(JsonError::TooLarge(10));
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(too_large.to_string(), "body must not be larger than 10 bytes");

        let empty = ApiError::from(JsonError::Empty);
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(empty.code(), "INVALID_PAYLOAD");
    }

    #[test]
    fn param_errors_are_bad_requests() {
        let err: ApiError = ParamError::NotFloat { key: "lat".into() }.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_PARAMETER");
        assert_eq!(err.to_string(), "lat must be a float value");
    }

    #[test]
    fn response_uses_error_envelope() {
        let response = ApiError::UnsupportedMediaType("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}

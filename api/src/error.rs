//! API error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::LeadResponse;

/// Request-level failures, rendered in the lead response shape
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body could not be read as the declared content type
    #[error("invalid request body: {0}")]
    BadPayload(String),

    /// Body exceeds the configured limit
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    /// Content type is not JSON, urlencoded or multipart
    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),
}

impl ApiError {
    /// Map an extractor rejection, keeping the size-limit case apart
    pub fn from_rejection(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(text)
        } else {
            Self::BadPayload(text)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadPayload(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Request rejected");
        let body = LeadResponse::failure(self.to_string());
        (self.status(), Json(body)).into_response()
    }
}

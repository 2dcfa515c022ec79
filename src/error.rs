use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::embedding::EmbedError;
use crate::translation::TranslateError;

/// Error body returned by the REST front-ends: `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<EmbedError> for ApiError {
    fn from(e: EmbedError) -> Self {
        error!("Failed to generate embedding: {}", e);
        Self::internal(e.to_string())
    }
}

impl From<TranslateError> for ApiError {
    fn from(e: TranslateError) -> Self {
        if e.is_client_error() {
            warn!("Rejected translation request: {}", e);
            Self::bad_request(e.to_string())
        } else {
            error!("Translation failed: {}", e);
            Self::internal(e.to_string())
        }
    }
}

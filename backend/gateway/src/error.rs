//! JSON error bodies for the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legalens_core::LegalensError;
use serde::Serialize;
use tracing::error;

pub const TIMEOUT_MESSAGE: &str = "Processing is taking longer than expected. \
Please try a smaller or clearer image, or a text file instead.";

/// `{ "error": ..., "details"?: ... }` with the matching status code.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<LegalensError> for ApiError {
    fn from(err: LegalensError) -> Self {
        match &err {
            LegalensError::MissingFile => Self::new(StatusCode::BAD_REQUEST, "No file provided"),
            LegalensError::UnsupportedMedia(media_type) => Self::new(
                StatusCode::BAD_REQUEST,
                format!(
                    "File type {media_type} is not supported. \
                     Please upload a text file (.txt) or an image file (.jpg, .png)."
                ),
            ),
            LegalensError::PayloadTooLarge { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, "File is too large").with_details(err.to_string())
            }
            LegalensError::BadRequest(message) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid request").with_details(message.clone())
            }
            LegalensError::Timeout(_) => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE).with_details(err.to_string())
            }
            LegalensError::Chat { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "Chat provider failed").with_details(err.to_string())
            }
            LegalensError::Config(_) | LegalensError::Other(_) => {
                error!(error = %err, "Unexpected failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process document")
                    .with_details(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn maps_statuses() {
        let cases = [
            (LegalensError::MissingFile, StatusCode::BAD_REQUEST),
            (LegalensError::UnsupportedMedia("application/pdf".into()), StatusCode::BAD_REQUEST),
            (LegalensError::PayloadTooLarge { size: 2, limit: 1 }, StatusCode::PAYLOAD_TOO_LARGE),
            (LegalensError::Timeout(Duration::from_secs(45)), StatusCode::GATEWAY_TIMEOUT),
            (
                LegalensError::Chat { provider: "gemini".into(), message: "503".into() },
                StatusCode::BAD_GATEWAY,
            ),
            (LegalensError::Config("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn timeout_body_carries_details() {
        let api = ApiError::from(LegalensError::Timeout(Duration::from_secs(45)));
        let body = serde_json::to_value(&api).unwrap();
        assert_eq!(body["error"], TIMEOUT_MESSAGE);
        assert_eq!(body["details"], "processing timed out after 45s");
        assert!(body.get("status").is_none());
    }

    #[test]
    fn missing_file_has_no_details() {
        let body = serde_json::to_value(ApiError::from(LegalensError::MissingFile)).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No file provided" }));
    }
}

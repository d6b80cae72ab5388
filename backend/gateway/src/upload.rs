//! Multipart document intake.
//!
//! Reads the `file` field of an upload form into a [`Document`], applying
//! the [`UploadPolicy`] before any extraction work starts.

use axum::extract::Multipart;
use axum::http::StatusCode;
use legalens_core::{Document, LegalensError};
use legalens_media::UploadPolicy;
use tracing::info;

use crate::error::ApiError;

/// Form field carrying the document.
pub const FILE_FIELD: &str = "file";

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Pull the document out of the form. Other fields are skipped.
pub async fn read_document(mut form: Multipart, policy: &UploadPolicy) -> Result<Document, ApiError> {
    while let Some(field) = form.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let media_type = field.content_type().unwrap_or(FALLBACK_MEDIA_TYPE).to_string();
        // Reject the type before buffering the body.
        if !policy.accepts_type(&media_type) {
            return Err(LegalensError::UnsupportedMedia(media_type).into());
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        policy.check(&media_type, data.len())?;

        info!(document = %name, media_type = %media_type, bytes = data.len(), "Received document");
        return Ok(Document::new(name, media_type, data));
    }
    Err(LegalensError::MissingFile.into())
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    let status = err.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(status, "File is too large").with_details(err.body_text())
    } else {
        ApiError::new(status, "Malformed upload").with_details(err.body_text())
    }
}

//! Admission checks applied at the request boundary, before extraction.

use legalens_core::LegalensError;
use tracing::debug;

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Image types the boundary accepts; any `text/*` type is accepted too.
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_MAX_UPLOAD_BYTES }
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn accepts_type(&self, media_type: &str) -> bool {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        essence.starts_with("text/") || ACCEPTED_IMAGE_TYPES.contains(&essence.as_str())
    }

    /// Reject uploads with a disallowed type or over the size ceiling.
    pub fn check(&self, media_type: &str, size: usize) -> Result<(), LegalensError> {
        if !self.accepts_type(media_type) {
            debug!(media_type, "Rejected upload type");
            return Err(LegalensError::UnsupportedMedia(media_type.to_string()));
        }
        if size > self.max_bytes {
            debug!(size, limit = self.max_bytes, "Rejected oversized upload");
            return Err(LegalensError::PayloadTooLarge { size, limit: self.max_bytes });
        }
        Ok(())
    }
}

use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the legalens pipeline and its HTTP boundary.
///
/// Recoverable extraction problems, OCR failures included, are *not* errors;
/// they travel in-band as [`crate::ExtractionOutcome`] variants. Only what
/// the caller must see as a failure lands here.
#[derive(Debug, Error)]
pub enum LegalensError {
    #[error("no file provided")]
    MissingFile,

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("file is too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("chat provider error ({provider}): {message}")]
    Chat { provider: String, message: String },

    #[error("processing timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_reports_whole_seconds() {
        let err = LegalensError::Timeout(Duration::from_secs(45));
        assert_eq!(err.to_string(), "processing timed out after 45s");
    }

    #[test]
    fn payload_too_large_names_both_sizes() {
        let err = LegalensError::PayloadTooLarge { size: 11, limit: 10 };
        assert!(err.to_string().contains("11 bytes"));
        assert!(err.to_string().contains("10 byte limit"));
    }
}

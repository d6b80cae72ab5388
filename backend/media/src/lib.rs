//! Media typing and upload admission for legalens.

pub mod mime_detect;
pub mod upload;

pub use mime_detect::detect_mime_type;
pub use upload::{UploadPolicy, ACCEPTED_IMAGE_TYPES, DEFAULT_MAX_UPLOAD_BYTES};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Extraction strategy class of a document, resolved once from its
/// declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// `text/*`: read directly.
    Text,
    /// `image/*`: handed to the OCR engine.
    Image,
    /// Anything else: never extracted.
    Unsupported,
}

impl MediaKind {
    pub fn from_media_type(media_type: &str) -> Self {
        let lower = media_type.trim().to_ascii_lowercase();
        if lower.starts_with("text/") {
            MediaKind::Text
        } else if lower.starts_with("image/") {
            MediaKind::Image
        } else {
            MediaKind::Unsupported
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MediaKind::Text => "text",
            MediaKind::Image => "image",
            MediaKind::Unsupported => "unsupported",
        };
        write!(f, "{s}")
    }
}

/// An uploaded document: immutable bytes plus the declared media type.
///
/// Lives for a single request and is dropped once extraction finishes.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub media_type: String,
    pub data: Bytes,
    kind: MediaKind,
}

impl Document {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let media_type = media_type.into();
        let kind = MediaKind::from_media_type(&media_type);
        Self {
            name: name.into(),
            media_type,
            data: data.into(),
            kind,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

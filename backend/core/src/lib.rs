pub mod analysis;
pub mod document;
pub mod error;
pub mod message;
pub mod traits;

pub use analysis::{
    AnalysisOutcome, AnalysisResult, ExtractionKind, ExtractionOutcome,
    EXTRACTION_FAILURE_MESSAGE, QUALITY_FALLBACK_MESSAGE,
};
pub use document::{Document, MediaKind};
pub use error::LegalensError;
pub use message::{ChatMessage, ChatRequest, ChatRole};
pub use traits::{ChatProvider, ChatStream, OcrEngine};

//! Extraction orchestrator: picks a strategy per media kind and converts
//! every recoverable failure into an in-band [`ExtractionOutcome`].

use std::sync::Arc;

use legalens_core::{AnalysisOutcome, Document, ExtractionOutcome, MediaKind, OcrEngine};
use tracing::{debug, info, warn};

use crate::analyzer::analyze;

/// OCR output with fewer non-whitespace characters than this is treated as
/// unusable.
pub const MIN_MEANINGFUL_CHARS: usize = 10;

/// Default OCR language hint.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Count of non-whitespace characters.
pub fn meaningful_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Stateless per call; safe to share across concurrent requests.
#[derive(Clone)]
pub struct Extractor {
    ocr: Arc<dyn OcrEngine>,
    language: String,
}

impl Extractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            ocr,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn ocr_name(&self) -> &str {
        self.ocr.name()
    }

    /// Extract text from a document. Never fails.
    pub async fn extract(&self, document: &Document) -> ExtractionOutcome {
        debug!(
            name = %document.name,
            media_type = %document.media_type,
            bytes = document.len(),
            "Extracting document text"
        );

        match document.kind() {
            MediaKind::Text => read_text(document),
            MediaKind::Image => self.recognize(document).await,
            MediaKind::Unsupported => {
                warn!(media_type = %document.media_type, "Unsupported media type, skipping extraction");
                ExtractionOutcome::Unsupported {
                    media_type: document.media_type.clone(),
                }
            }
        }
    }

    /// Extract and analyze in one step.
    pub async fn process(&self, document: &Document) -> AnalysisOutcome {
        let outcome = self.extract(document).await;
        let extraction = outcome.kind();
        let text = outcome.into_text();
        let analysis = analyze(&text);
        AnalysisOutcome {
            text,
            analysis,
            extraction,
        }
    }

    async fn recognize(&self, document: &Document) -> ExtractionOutcome {
        info!(engine = %self.ocr.name(), bytes = document.len(), "Starting OCR");
        match self.ocr.recognize(&document.data, &self.language).await {
            Ok(text) => {
                let chars = meaningful_chars(&text);
                if chars < MIN_MEANINGFUL_CHARS {
                    info!(chars, "OCR output below the meaningful-content floor");
                    ExtractionOutcome::QualityFallback
                } else {
                    info!(chars, "OCR completed");
                    ExtractionOutcome::Success(text)
                }
            }
            Err(e) => {
                warn!(engine = %self.ocr.name(), error = %e, "OCR failed");
                ExtractionOutcome::ExtractionFailure
            }
        }
    }
}

fn read_text(document: &Document) -> ExtractionOutcome {
    let text = String::from_utf8_lossy(&document.data).into_owned();
    if text.trim().is_empty() {
        ExtractionOutcome::QualityFallback
    } else {
        ExtractionOutcome::Success(text)
    }
}

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Substitute text when OCR produced too little to be useful.
pub const QUALITY_FALLBACK_MESSAGE: &str = "Limited text was extracted from this document. \
The document may be low quality or contain handwriting that's difficult to recognize. \
For best results, consider uploading a clearer image or a text file.";

/// Substitute text when the OCR engine itself failed.
pub const EXTRACTION_FAILURE_MESSAGE: &str =
    "Error processing image with OCR. Please try a different image or a text file.";

/// Result of the extraction step.
///
/// Every variant renders to non-empty text, so the analyzer always has
/// something to work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Usable text, either read directly or recognized by OCR.
    Success(String),
    /// OCR returned nothing, whitespace, or fewer than ten meaningful characters.
    QualityFallback,
    /// The OCR engine raised an error.
    ExtractionFailure,
    /// The declared media type is neither text nor image.
    Unsupported { media_type: String },
}

impl ExtractionOutcome {
    pub fn kind(&self) -> ExtractionKind {
        match self {
            ExtractionOutcome::Success(_) => ExtractionKind::Success,
            ExtractionOutcome::QualityFallback => ExtractionKind::QualityFallback,
            ExtractionOutcome::ExtractionFailure => ExtractionKind::ExtractionFailure,
            ExtractionOutcome::Unsupported { .. } => ExtractionKind::Unsupported,
        }
    }

    /// The text handed to the analyzer and returned to the caller.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            ExtractionOutcome::Success(text) => Cow::Borrowed(text),
            ExtractionOutcome::QualityFallback => Cow::Borrowed(QUALITY_FALLBACK_MESSAGE),
            ExtractionOutcome::ExtractionFailure => Cow::Borrowed(EXTRACTION_FAILURE_MESSAGE),
            ExtractionOutcome::Unsupported { media_type } => Cow::Owned(format!(
                "File type {media_type} is not supported for text extraction. \
Please upload a text file (.txt) or an image file (.jpg, .png)."
            )),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ExtractionOutcome::Success(text) => text,
            other => other.text().into_owned(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, ExtractionOutcome::Success(_))
    }
}

/// Payload-free tag of an [`ExtractionOutcome`], for logs and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionKind {
    #[default]
    Success,
    QualityFallback,
    ExtractionFailure,
    Unsupported,
}

impl std::fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExtractionKind::Success => "success",
            ExtractionKind::QualityFallback => "quality_fallback",
            ExtractionKind::ExtractionFailure => "extraction_failure",
            ExtractionKind::Unsupported => "unsupported",
        };
        write!(f, "{s}")
    }
}

/// Heuristic analysis of a piece of extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    /// At most five entries, never empty.
    pub key_points: Vec<String>,
    /// At most three entries, never empty.
    pub potential_issues: Vec<String>,
}

/// Extracted text paired with its analysis; the unit returned across the
/// system boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub text: String,
    pub analysis: AnalysisResult,
    #[serde(skip)]
    pub extraction: ExtractionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_texts_are_distinct_and_non_empty() {
        let quality = ExtractionOutcome::QualityFallback.into_text();
        let failure = ExtractionOutcome::ExtractionFailure.into_text();
        let unsupported = ExtractionOutcome::Unsupported {
            media_type: "application/pdf".into(),
        }
        .into_text();

        assert!(!quality.is_empty());
        assert_ne!(quality, failure);
        assert_ne!(failure, unsupported);
        assert_ne!(quality, unsupported);
        assert!(unsupported.contains("application/pdf"));
    }

    #[test]
    fn success_text_passes_through() {
        let outcome = ExtractionOutcome::Success("Hello world.".into());
        assert_eq!(outcome.text(), "Hello world.");
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.kind(), ExtractionKind::Success);
    }

    #[test]
    fn outcome_serializes_camel_case_without_extraction_tag() {
        let outcome = AnalysisOutcome {
            text: "t".into(),
            analysis: AnalysisResult {
                summary: "s".into(),
                key_points: vec!["k".into()],
                potential_issues: vec!["p".into()],
            },
            extraction: ExtractionKind::QualityFallback,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["analysis"]["keyPoints"][0], "k");
        assert_eq!(json["analysis"]["potentialIssues"][0], "p");
        assert!(json.get("extraction").is_none());
    }
}

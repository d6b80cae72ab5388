//! Document understanding for legalens.
//!
//! Turns an uploaded [`Document`](legalens_core::Document) into an
//! [`AnalysisOutcome`](legalens_core::AnalysisOutcome): text extraction
//! (direct read or OCR), keyword heuristics over a static legal vocabulary,
//! and a wall-clock governor that reports progress and enforces a deadline.

pub mod analyzer;
pub mod dictionary;
pub mod extractor;
pub mod governor;
pub mod ocr;
pub mod pipeline;
pub mod vision;

pub use analyzer::{analyze, extract_key_phrases, identify_potential_issues, split_sentences, summarize};
pub use extractor::{meaningful_chars, Extractor, MIN_MEANINGFUL_CHARS};
pub use governor::{Cadence, Governed, ProgressGovernor, DEFAULT_TIMEOUT, PROGRESS_CEILING, PROGRESS_COMPLETE};
pub use ocr::{DisabledOcr, TesseractCli};
pub use pipeline::DocumentPipeline;
pub use vision::VisionOcr;

//! The one canonical document pipeline: governed extraction followed by
//! analysis. Both the HTTP gateway and the CLI run documents through here.

use std::time::Instant;

use legalens_core::{AnalysisOutcome, Document, LegalensError};
use legalens_logging::{redacted_preview, EventLogger, PipelineEvent};
use tokio::sync::watch;

use crate::extractor::Extractor;
use crate::governor::{Cadence, Governed, ProgressGovernor};

const PREVIEW_CHARS: usize = 80;

#[derive(Clone)]
pub struct DocumentPipeline {
    extractor: Extractor,
    governor: ProgressGovernor,
}

impl DocumentPipeline {
    pub fn new(extractor: Extractor, governor: ProgressGovernor) -> Self {
        Self { extractor, governor }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn governor(&self) -> &ProgressGovernor {
        &self.governor
    }

    /// Extract and analyze `document`, publishing progress on `progress`.
    ///
    /// Degraded extractions still succeed with fallback text; only the
    /// deadline yields an error. A result that arrives after the deadline is
    /// discarded together with the work future.
    pub async fn run(
        &self,
        request_id: &str,
        document: &Document,
        progress: &watch::Sender<u8>,
    ) -> Result<AnalysisOutcome, LegalensError> {
        let started = Instant::now();
        let cadence = Cadence::for_kind(document.kind());

        match self
            .governor
            .run(cadence, progress, self.extractor.process(document))
            .await
        {
            Governed::Completed(outcome) => {
                EventLogger::log_event(
                    request_id,
                    PipelineEvent::ExtractionFinished {
                        document: document.name.clone(),
                        media_kind: document.kind().to_string(),
                        outcome: outcome.extraction.to_string(),
                        text_chars: outcome.text.chars().count(),
                        preview: redacted_preview(&outcome.text, PREVIEW_CHARS),
                        elapsed_ms: started.elapsed().as_millis() as u64,
                    },
                );
                Ok(outcome)
            }
            Governed::TimedOut(timeout) => {
                EventLogger::log_event(
                    request_id,
                    PipelineEvent::ExtractionTimedOut {
                        document: document.name.clone(),
                        media_kind: document.kind().to_string(),
                        timeout_secs: timeout.as_secs(),
                    },
                );
                Err(LegalensError::Timeout(timeout))
            }
        }
    }

    /// [`run`](Self::run) without an external progress observer.
    pub async fn run_unobserved(
        &self,
        request_id: &str,
        document: &Document,
    ) -> Result<AnalysisOutcome, LegalensError> {
        let (progress, _rx) = watch::channel(0u8);
        self.run(request_id, document, &progress).await
    }
}

//! Pipeline Event Logger
//!
//! Structured events (extraction finished, timed out, chat relayed) written
//! through `tracing` on the `pipeline_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    ExtractionFinished {
        document: String,
        media_kind: String,
        outcome: String,
        text_chars: usize,
        preview: String,
        elapsed_ms: u64,
    },
    ExtractionTimedOut {
        document: String,
        media_kind: String,
        timeout_secs: u64,
    },
    ChatRelayed {
        provider: String,
        messages: usize,
        last_user_message: String,
    },
    Error {
        error_msg: String,
    },
}

impl PipelineEvent {
    fn is_failure(&self) -> bool {
        matches!(
            self,
            PipelineEvent::ExtractionTimedOut { .. } | PipelineEvent::Error { .. }
        )
    }
}

#[derive(Debug, Serialize)]
pub struct PipelineLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: PipelineEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact free-text fields and emit the event. Returns the logged entry.
    pub fn log_event(request_id: &str, mut event: PipelineEvent) -> PipelineLogEntry {
        match &mut event {
            PipelineEvent::ExtractionFinished { preview, document, .. } => {
                *preview = redact_sensitive_data(preview);
                *document = redact_sensitive_data(document);
            }
            PipelineEvent::ExtractionTimedOut { document, .. } => {
                *document = redact_sensitive_data(document);
            }
            PipelineEvent::ChatRelayed { last_user_message, .. } => {
                *last_user_message = redact_sensitive_data(last_user_message);
            }
            PipelineEvent::Error { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
        }

        let entry = PipelineLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        let payload = serde_json::to_string(&entry).unwrap_or_default();
        if entry.event.is_failure() {
            warn!(target: "pipeline_events", event = %payload, "Pipeline event");
        } else {
            info!(target: "pipeline_events", event = %payload, "Pipeline event");
        }
        entry
    }
}

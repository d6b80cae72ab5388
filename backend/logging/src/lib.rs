//! Telemetry and structured logging for legalens.
//!
//! Handles subscriber setup (console + rolling NDJSON file), PII redaction,
//! and structured pipeline events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogger, PipelineEvent, PipelineLogEntry};
pub use logger::{init_logger, LogSettings};
pub use redact::{redact_sensitive_data, redacted_preview};

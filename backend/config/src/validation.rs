//! Config validation: field checks with user-friendly messages.

use crate::defaults::DEFAULT_PORT;
use crate::schema::{ChatProviderKind, LegalensConfig, OcrEngineKind};
use thiserror::Error;

/// Highest page segmentation mode tesseract accepts.
const MAX_PAGE_SEG_MODE: u8 = 13;

/// Extraction deadlines above this are allowed but flagged.
const LONG_TIMEOUT_SECS: u64 = 120;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &LegalensConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_extraction(config, &mut report);
    validate_ocr(config, &mut report);
    validate_chat(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &LegalensConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    match server.port {
        Some(0) => report.error("server.port", "port must be between 1 and 65535"),
        Some(port) if port < 1024 && port != 80 && port != 443 => report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider {DEFAULT_PORT}"),
        ),
        _ => {}
    }
    if server.max_upload_bytes == Some(0) {
        report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
    }
    if server.bind.as_deref().is_some_and(|b| b.trim().is_empty()) {
        report.error("server.bind", "bind address cannot be empty");
    }
}

fn validate_extraction(config: &LegalensConfig, report: &mut ValidationReport) {
    let Some(extraction) = &config.extraction else { return };
    match extraction.timeout_secs {
        Some(0) => report.error("extraction.timeoutSecs", "timeoutSecs must be >= 1"),
        Some(secs) if secs > LONG_TIMEOUT_SECS => report.warn(
            "extraction.timeoutSecs",
            format!("A {secs}s deadline keeps clients waiting; most documents finish well under {LONG_TIMEOUT_SECS}s"),
        ),
        _ => {}
    }
    if extraction.ocr_language.as_deref().is_some_and(|l| l.trim().is_empty()) {
        report.error("extraction.ocrLanguage", "ocrLanguage cannot be empty");
    }
}

fn validate_ocr(config: &LegalensConfig, report: &mut ValidationReport) {
    let Some(ocr) = &config.ocr else { return };
    if let Some(psm) = ocr.page_seg_mode {
        if psm > MAX_PAGE_SEG_MODE {
            report.error(
                "ocr.pageSegMode",
                format!("pageSegMode {psm} is out of range (0-{MAX_PAGE_SEG_MODE})"),
            );
        }
    }
    if ocr.engine == Some(OcrEngineKind::Gemini) && config.ocr_api_key().is_none() {
        report.error("ocr.apiKey", "The gemini OCR engine requires an API key");
    }
    if ocr.engine == Some(OcrEngineKind::Disabled) {
        report.warn("ocr.engine", "OCR is disabled; every image upload will fail extraction");
    }
}

fn validate_chat(config: &LegalensConfig, report: &mut ValidationReport) {
    let Some(chat) = &config.chat else { return };
    if chat.provider == Some(ChatProviderKind::Gemini) && config.chat_api_key().is_none() {
        report.warn("chat.apiKey", "No API key for the gemini chat provider; chat requests will fail");
    }
    if chat.timeout_secs == Some(0) {
        report.error("chat.timeoutSecs", "timeoutSecs must be >= 1");
    }
}

fn validate_logging(config: &LegalensConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        if !matches!(
            level.to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) && !level.contains('=')
        {
            report.warn(
                "logging.level",
                format!("Unknown log level '{level}'; expected trace, debug, info, warn, error or a filter directive"),
            );
        }
    }
}

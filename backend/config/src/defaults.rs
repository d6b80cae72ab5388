//! Config defaults: applies default values to a parsed config.

use crate::schema::{
    ChatConfig, ChatProviderKind, ExtractionConfig, LegalensConfig, LoggingConfig, OcrConfig,
    OcrEngineKind, ServerConfig,
};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// 10 MiB upload ceiling.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_CORS_ORIGIN: &str = "*";

pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 45;
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

pub const DEFAULT_TESSERACT_PATH: &str = "tesseract";
pub const DEFAULT_PAGE_SEG_MODE: u8 = 1;
pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: LegalensConfig) -> LegalensConfig {
    let config = apply_server_defaults(config);
    let config = apply_extraction_defaults(config);
    let config = apply_ocr_defaults(config);
    let config = apply_chat_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: LegalensConfig) -> LegalensConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    server.cors_allow_origin.get_or_insert_with(|| DEFAULT_CORS_ORIGIN.to_string());
    config
}

fn apply_extraction_defaults(mut config: LegalensConfig) -> LegalensConfig {
    let extraction = config.extraction.get_or_insert_with(ExtractionConfig::default);
    extraction.timeout_secs.get_or_insert(DEFAULT_EXTRACTION_TIMEOUT_SECS);
    extraction.ocr_language.get_or_insert_with(|| DEFAULT_OCR_LANGUAGE.to_string());
    config
}

fn apply_ocr_defaults(mut config: LegalensConfig) -> LegalensConfig {
    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    ocr.engine.get_or_insert(OcrEngineKind::Tesseract);
    ocr.tesseract_path.get_or_insert_with(|| DEFAULT_TESSERACT_PATH.to_string());
    ocr.page_seg_mode.get_or_insert(DEFAULT_PAGE_SEG_MODE);
    ocr.model.get_or_insert_with(|| DEFAULT_VISION_MODEL.to_string());
    config
}

/// Without an explicit provider, use Gemini when a key is present.
fn apply_chat_defaults(mut config: LegalensConfig) -> LegalensConfig {
    let chat = config.chat.get_or_insert_with(ChatConfig::default);
    if chat.provider.is_none() {
        let has_key = chat.api_key.as_deref().map(|k| !k.is_empty()).unwrap_or(false);
        chat.provider = Some(if has_key { ChatProviderKind::Gemini } else { ChatProviderKind::Mock });
    }
    chat.model.get_or_insert_with(|| DEFAULT_CHAT_MODEL.to_string());
    chat.timeout_secs.get_or_insert(DEFAULT_CHAT_TIMEOUT_SECS);
    config
}

fn apply_logging_defaults(mut config: LegalensConfig) -> LegalensConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.dir.get_or_insert_with(|| DEFAULT_LOG_DIR.to_string());
    logging.file.get_or_insert(true);
    logging.json.get_or_insert(false);
    config
}

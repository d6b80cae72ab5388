//! legalens runtime configuration schema, typed for serde YAML/JSON.
//!
//! Every section and field is optional in the file; `apply_all_defaults`
//! fills the gaps and the accessors on [`LegalensConfig`] fall back to the
//! same defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::defaults::{
    DEFAULT_BIND, DEFAULT_CHAT_MODEL, DEFAULT_CHAT_TIMEOUT_SECS, DEFAULT_CORS_ORIGIN,
    DEFAULT_EXTRACTION_TIMEOUT_SECS, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_OCR_LANGUAGE, DEFAULT_PAGE_SEG_MODE, DEFAULT_PORT, DEFAULT_TESSERACT_PATH,
    DEFAULT_VISION_MODEL,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalensConfig {
    /// HTTP server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Extraction deadline and OCR language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionConfig>,

    /// OCR engine selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Chat provider selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_allow_origin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    Tesseract,
    Gemini,
    Disabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<OcrEngineKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_path: Option<String>,
    /// Tesseract `--psm` value (0-13).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_seg_mode: Option<u8>,
    /// Empty string disables the whitelist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_whitelist: Option<String>,
    /// Gemini key for the vision engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatProviderKind {
    Gemini,
    Mock,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ChatProviderKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Write the rolling NDJSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<bool>,
    /// JSON console output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved accessors
// ---------------------------------------------------------------------------

impl LegalensConfig {
    pub fn bind(&self) -> &str {
        self.server.as_ref().and_then(|s| s.bind.as_deref()).unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server
            .as_ref()
            .and_then(|s| s.max_upload_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn cors_allow_origin(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.cors_allow_origin.as_deref())
            .unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(
            self.extraction
                .as_ref()
                .and_then(|e| e.timeout_secs)
                .unwrap_or(DEFAULT_EXTRACTION_TIMEOUT_SECS),
        )
    }

    pub fn ocr_language(&self) -> &str {
        self.extraction
            .as_ref()
            .and_then(|e| e.ocr_language.as_deref())
            .unwrap_or(DEFAULT_OCR_LANGUAGE)
    }

    pub fn ocr_engine(&self) -> OcrEngineKind {
        self.ocr.as_ref().and_then(|o| o.engine).unwrap_or(OcrEngineKind::Tesseract)
    }

    pub fn tesseract_path(&self) -> &str {
        self.ocr
            .as_ref()
            .and_then(|o| o.tesseract_path.as_deref())
            .unwrap_or(DEFAULT_TESSERACT_PATH)
    }

    pub fn page_seg_mode(&self) -> u8 {
        self.ocr.as_ref().and_then(|o| o.page_seg_mode).unwrap_or(DEFAULT_PAGE_SEG_MODE)
    }

    /// `None` means "use the built-in whitelist"; `Some("")` disables it.
    pub fn char_whitelist(&self) -> Option<&str> {
        self.ocr.as_ref().and_then(|o| o.char_whitelist.as_deref())
    }

    pub fn ocr_api_key(&self) -> Option<&str> {
        self.ocr
            .as_ref()
            .and_then(|o| o.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn ocr_model(&self) -> &str {
        self.ocr.as_ref().and_then(|o| o.model.as_deref()).unwrap_or(DEFAULT_VISION_MODEL)
    }

    pub fn chat_provider(&self) -> ChatProviderKind {
        self.chat
            .as_ref()
            .and_then(|c| c.provider)
            .unwrap_or(ChatProviderKind::Mock)
    }

    pub fn chat_model(&self) -> &str {
        self.chat.as_ref().and_then(|c| c.model.as_deref()).unwrap_or(DEFAULT_CHAT_MODEL)
    }

    pub fn chat_api_key(&self) -> Option<&str> {
        self.chat
            .as_ref()
            .and_then(|c| c.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(
            self.chat
                .as_ref()
                .and_then(|c| c.timeout_secs)
                .unwrap_or(DEFAULT_CHAT_TIMEOUT_SECS),
        )
    }

    pub fn log_level(&self) -> &str {
        self.logging.as_ref().and_then(|l| l.level.as_deref()).unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// `None` when file logging is switched off.
    pub fn log_dir(&self) -> Option<PathBuf> {
        let logging = self.logging.as_ref();
        if logging.and_then(|l| l.file) == Some(false) {
            return None;
        }
        Some(PathBuf::from(
            logging.and_then(|l| l.dir.as_deref()).unwrap_or(DEFAULT_LOG_DIR),
        ))
    }

    pub fn json_console(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

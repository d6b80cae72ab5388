//! Wiring from a prepared config to the live collaborators.

use std::sync::Arc;

use anyhow::{bail, Result};
use legalens_chat::{GeminiChat, MockChat};
use legalens_config::{ChatProviderKind, LegalensConfig, OcrEngineKind};
use legalens_core::{ChatProvider, OcrEngine};
use legalens_logging::LogSettings;
use legalens_media::UploadPolicy;
use legalens_understanding::{
    DisabledOcr, DocumentPipeline, Extractor, ProgressGovernor, TesseractCli, VisionOcr,
};
use tracing::info;

pub fn log_settings(config: &LegalensConfig) -> LogSettings {
    LogSettings {
        level: config.log_level().to_string(),
        dir: config.log_dir(),
        json_console: config.json_console(),
    }
}

pub fn build_ocr(config: &LegalensConfig) -> Result<Arc<dyn OcrEngine>> {
    let engine: Arc<dyn OcrEngine> = match config.ocr_engine() {
        OcrEngineKind::Tesseract => {
            let mut tesseract = TesseractCli::new()
                .with_binary(config.tesseract_path())
                .with_page_seg_mode(config.page_seg_mode());
            // An empty whitelist in the file lifts the restriction.
            if let Some(whitelist) = config.char_whitelist() {
                tesseract = tesseract.with_char_whitelist(
                    (!whitelist.is_empty()).then(|| whitelist.to_string()),
                );
            }
            Arc::new(tesseract)
        }
        OcrEngineKind::Gemini => {
            let Some(key) = config.ocr_api_key() else {
                bail!("ocr.engine is gemini but no API key is configured");
            };
            Arc::new(VisionOcr::gemini(key).with_model(config.ocr_model()))
        }
        OcrEngineKind::Disabled => Arc::new(DisabledOcr),
    };
    info!(engine = engine.name(), "OCR engine ready");
    Ok(engine)
}

pub fn build_chat(config: &LegalensConfig) -> Arc<dyn ChatProvider> {
    match config.chat_provider() {
        // Without a key validation has already warned; requests fail upstream.
        ChatProviderKind::Gemini => Arc::new(
            GeminiChat::with_timeout(config.chat_api_key().unwrap_or_default(), config.chat_timeout())
                .with_model(config.chat_model()),
        ),
        ChatProviderKind::Mock => Arc::new(MockChat::new("mock")),
    }
}

pub fn build_pipeline(config: &LegalensConfig) -> Result<DocumentPipeline> {
    let extractor = Extractor::new(build_ocr(config)?).with_language(config.ocr_language());
    Ok(DocumentPipeline::new(
        extractor,
        ProgressGovernor::new(config.extraction_timeout()),
    ))
}

pub fn upload_policy(config: &LegalensConfig) -> UploadPolicy {
    UploadPolicy::new(config.max_upload_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalens_config::{apply_all_defaults, OcrConfig};
    use std::time::Duration;

    #[test]
    fn defaults_wire_tesseract_and_mock_chat() {
        let config = apply_all_defaults(LegalensConfig::default());
        let pipeline = build_pipeline(&config).unwrap();
        assert_eq!(pipeline.extractor().ocr_name(), "tesseract");
        assert_eq!(pipeline.extractor().language(), "eng");
        assert_eq!(pipeline.governor().timeout(), Duration::from_secs(45));
        assert_eq!(build_chat(&config).name(), "mock");
        assert_eq!(upload_policy(&config).max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn gemini_ocr_without_key_is_an_error() {
        let config = LegalensConfig {
            ocr: Some(OcrConfig {
                engine: Some(OcrEngineKind::Gemini),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(build_ocr(&config).is_err());
    }

    #[test]
    fn disabled_ocr_is_wired() {
        let config = LegalensConfig {
            ocr: Some(OcrConfig {
                engine: Some(OcrEngineKind::Disabled),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(build_ocr(&config).unwrap().name(), "disabled");
    }
}

//! Vision OCR: transcribe document images with a hosted vision model.
//!
//! For hosts without a local Tesseract install.
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use legalens_core::OcrEngine;
use reqwest::Client;
use tracing::info;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the key; URLs end up in error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct VisionOcr {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl VisionOcr {
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gemini-1.5-flash".to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Guess an image MIME type from its magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xff, 0xd8, 0xff, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "application/octet-stream",
    }
}

fn transcription_prompt(language: &str) -> String {
    format!(
        "Transcribe all legible text in this document image exactly as written \
(language hint: {language}). Return only the transcribed text, without commentary."
    )
}

fn request_body(image: &[u8], language: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{ "parts": [
            { "text": transcription_prompt(language) },
            { "inlineData": { "mimeType": sniff_image_mime(image), "data": STANDARD.encode(image) } }
        ]}]
    })
}

/// Concatenate the text parts of the first candidate.
fn response_text(json: &serde_json::Value) -> String {
    json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl OcrEngine for VisionOcr {
    fn name(&self) -> &str {
        "gemini-vision"
    }

    async fn recognize(&self, image: &[u8], language: &str) -> Result<String> {
        info!(model = %self.model, bytes = image.len(), "[Vision] Transcribing image");
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body(image, language))
            .send()
            .await
            .context("Vision OCR request failed")?;
        if !resp.status().is_success() {
            let status = resp.status();
            bail!("Gemini vision error {}: {}", status, resp.text().await.unwrap_or_default());
        }
        let json: serde_json::Value = resp.json().await.context("Failed to parse vision response")?;
        Ok(response_text(&json))
    }
}

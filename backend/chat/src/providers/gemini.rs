use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use legalens_core::{ChatProvider, ChatRequest, ChatRole, ChatStream};

use crate::sse::text_deltas;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The key travels in a header so transport errors, which quote the URL,
/// never carry it.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini streaming chat provider.
pub struct GeminiChat {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiChat {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    /// `timeout` bounds the whole streamed response.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key: api_key.into(),
            model: "gemini-1.5-pro".to_string(),
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

impl GenerateRequest {
    /// System turns join the system instruction; assistant turns become
    /// Gemini's `model` role.
    fn from_chat(request: &ChatRequest) -> Self {
        let mut system = request.system_prompt.clone();
        let mut contents = Vec::new();
        for message in &request.messages {
            match message.role {
                ChatRole::System => {
                    system.push_str("\n\n");
                    system.push_str(&message.content);
                }
                ChatRole::User | ChatRole::Assistant => contents.push(Content {
                    role: Some(if message.role == ChatRole::User { "user" } else { "model" }),
                    parts: vec![Part { text: message.content.clone() }],
                }),
            }
        }
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents,
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiChat {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChatStream> {
        let body = GenerateRequest::from_chat(request);
        debug!(model = %self.model, turns = body.contents.len(), "Sending streaming request to Gemini");

        let response = self
            .client
            .post(format!(
                "{}/models/{}:streamGenerateContent?alt=sse",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!("Gemini returned {}: {}", status, error_body);
        }

        Ok(text_deltas(response.bytes_stream()))
    }
}

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use legalens_core::{ChatProvider, ChatRequest, ChatStream};

/// A mock chat provider that streams canned chunks.
pub struct MockChat {
    name: String,
    chunks: Vec<String>,
    failure: Option<String>,
}

impl MockChat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chunks: vec![
                "I am not a lawyer, ".to_string(),
                "and this is not legal advice. ".to_string(),
                "Please consult a qualified attorney.".to_string(),
            ],
            failure: None,
        }
    }

    pub fn with_chunks<I, S>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chunks = chunks.into_iter().map(Into::into).collect();
        self
    }

    /// End the stream with an error after the chunks.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    fn name(&self) -> &str {
        &self.name
    }

    async fn stream_chat(&self, _request: &ChatRequest) -> Result<ChatStream> {
        let mut items: Vec<Result<String>> = self.chunks.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.failure {
            items.push(Err(anyhow!(message.clone())));
        }
        Ok(stream::iter(items).boxed())
    }
}

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::message::ChatRequest;

/// Optical character recognition collaborator.
///
/// Implementations may be slow (seconds) and may fail; the extractor turns
/// failures into in-band fallback text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name (e.g., "tesseract", "gemini-vision").
    fn name(&self) -> &str;

    /// Recognize the text in raw image bytes, using `language` as a hint.
    async fn recognize(&self, image: &[u8], language: &str) -> Result<String>;
}

/// Incremental text deltas from a chat provider.
pub type ChatStream = BoxStream<'static, Result<String>>;

/// Hosted chat-completion collaborator.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "mock").
    fn name(&self) -> &str;

    /// Start a completion and return its streamed deltas.
    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChatStream>;
}

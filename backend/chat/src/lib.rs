//! Chat collaborator for legalens: the legal-assistant system prompt and
//! providers that stream completions from a hosted model.

pub mod prompt;
pub mod providers;
pub mod sse;

pub use prompt::{build_request, LEGAL_ASSISTANT_PROMPT};
pub use providers::gemini::GeminiChat;
pub use providers::mock::MockChat;

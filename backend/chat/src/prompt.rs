use legalens_core::{ChatMessage, ChatRequest, LegalensError};

/// System prompt for every conversation.
pub const LEGAL_ASSISTANT_PROMPT: &str = "You are a legal assistant AI specialized in providing guidance on legal matters.
You can help with understanding legal documents, explaining legal concepts, and providing general legal information.

Important notes:
- You are not a lawyer and should clarify that your responses do not constitute legal advice
- You should recommend consulting with a qualified attorney for specific legal situations
- Be accurate, clear, and helpful in your explanations of legal concepts
- When uncertain, acknowledge limitations rather than providing potentially incorrect information";

/// Validate a conversation and wrap it with the legal-assistant prompt.
pub fn build_request(messages: Vec<ChatMessage>) -> Result<ChatRequest, LegalensError> {
    if messages.is_empty() {
        return Err(LegalensError::BadRequest("messages must not be empty".into()));
    }
    if messages.iter().all(|m| m.content.trim().is_empty()) {
        return Err(LegalensError::BadRequest("messages have no content".into()));
    }
    Ok(ChatRequest {
        system_prompt: LEGAL_ASSISTANT_PROMPT.to_string(),
        messages,
    })
}

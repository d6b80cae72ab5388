//! Log Redaction Layer
//!
//! Scrubs e-mail addresses, phone numbers, API keys and bearer tokens from
//! strings before they reach a log sink. Uploaded legal documents routinely
//! carry contact details, so any text preview goes through here.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());
static TELEPHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static API_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(AIza[0-9A-Za-z\-_]{35})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)|(key=[0-9A-Za-z\-_]{20,})")
        .unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = EMAIL_RE.replace_all(&redacted, "[REDACTED_EMAIL]");
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

/// Redacted, whitespace-collapsed prefix of `text`, at most `max_chars` long
/// (plus an ellipsis when cut).
pub fn redacted_preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let redacted = redact_sensitive_data(&collapsed);
    if redacted.chars().count() <= max_chars {
        return redacted;
    }
    let mut cut: String = redacted.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "Call +1-555-123-4567 or mail counsel@lawfirm.com with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("+1-555-123-4567"));
        assert!(!clean.contains("counsel@lawfirm.com"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(clean.contains("[REDACTED_EMAIL]"));
    }

    #[test]
    fn redacts_google_api_keys_in_urls() {
        let clean = redact_sensitive_data("POST /v1beta/models/x?key=AIzaSyA1234567890abcdefghijklmnopqrstu");
        assert!(!clean.contains("AIzaSy"));
    }

    #[test]
    fn preview_collapses_and_truncates() {
        assert_eq!(redacted_preview("This   agreement\n\nbinds", 80), "This agreement binds");
        assert_eq!(redacted_preview("abcdefghij", 4), "abcd…");
    }
}

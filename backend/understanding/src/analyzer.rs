//! Keyword heuristics over extracted text.
//!
//! Every function here is pure and total: identical input always yields the
//! identical result, and no input makes them fail.

use legalens_core::AnalysisResult;

use crate::dictionary::{
    ISSUE_TRIGGERS, LEGAL_TERMS, MAX_ISSUES, MAX_KEY_PHRASES, NO_ISSUES, NO_KEY_PHRASES,
    SUMMARY_SENTENCES,
};

/// Split text on runs of `.`, `!` and `?`, dropping blank fragments.
///
/// Fragments keep their surrounding whitespace.
fn raw_sentences(text: &str) -> Vec<&str> {
    text.split(|c: char| matches!(c, '.' | '!' | '?'))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// [`raw_sentences`], trimmed.
pub fn split_sentences(text: &str) -> Vec<&str> {
    raw_sentences(text).into_iter().map(str::trim).collect()
}

/// First three sentences, or the whole text when it has three or fewer.
///
/// Sentences are rejoined untrimmed, so the space after each delimiter
/// survives next to the inserted one.
pub fn summarize(text: &str) -> String {
    let sentences = raw_sentences(text);
    if sentences.len() <= SUMMARY_SENTENCES {
        return text.to_string();
    }
    format!("{}.", sentences[..SUMMARY_SENTENCES].join(". "))
}

/// Sentences that mention a legal vocabulary term, in document order.
pub fn extract_key_phrases(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let matched: Vec<&str> = LEGAL_TERMS
        .iter()
        .copied()
        .filter(|term| lower.contains(term))
        .collect();

    let phrases: Vec<String> = if matched.is_empty() {
        Vec::new()
    } else {
        split_sentences(text)
            .into_iter()
            .filter(|sentence| {
                let sentence = sentence.to_lowercase();
                matched.iter().any(|term| sentence.contains(term))
            })
            .take(MAX_KEY_PHRASES)
            .map(str::to_string)
            .collect()
    };

    if phrases.is_empty() {
        vec![NO_KEY_PHRASES.to_string()]
    } else {
        phrases
    }
}

/// Canned issue descriptions for every trigger stem found, in table order.
pub fn identify_potential_issues(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let issues: Vec<String> = ISSUE_TRIGGERS
        .iter()
        .filter(|trigger| lower.contains(trigger.stem))
        .take(MAX_ISSUES)
        .map(|trigger| trigger.issue.to_string())
        .collect();

    if issues.is_empty() {
        vec![NO_ISSUES.to_string()]
    } else {
        issues
    }
}

pub fn analyze(text: &str) -> AnalysisResult {
    AnalysisResult {
        summary: summarize(text),
        key_points: extract_key_phrases(text),
        potential_issues: identify_potential_issues(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "This agreement may be subject to termination. \
The parties agree to indemnify each other. Governing law is California. \
This is a fourth sentence.";

    #[test]
    fn short_text_is_its_own_summary() {
        assert_eq!(summarize("Hello world."), "Hello world.");
        assert_eq!(summarize("One. Two! Three?"), "One. Two! Three?");
    }

    #[test]
    fn text_without_punctuation_is_one_sentence() {
        let text = "  no terminal punctuation here  ";
        assert_eq!(split_sentences(text).len(), 1);
        assert_eq!(summarize(text), text);
    }

    #[test]
    fn long_text_keeps_first_three_sentences() {
        assert_eq!(
            summarize(CONTRACT),
            "This agreement may be subject to termination.  \
The parties agree to indemnify each other.  Governing law is California."
        );
    }

    #[test]
    fn delimiter_runs_do_not_create_sentences() {
        assert_eq!(split_sentences("Wait...  what?! Yes."), vec!["Wait", "what", "Yes"]);
        assert_eq!(summarize("A... B!! C?? D."), "A.  B.  C.");
        assert_eq!(summarize("A. B. C. D."), "A.  B.  C.");
        assert_eq!(summarize("A.B.C.D."), "A. B. C.");
    }

    #[test]
    fn empty_text_is_handled() {
        assert_eq!(summarize(""), "");
        assert_eq!(extract_key_phrases(""), vec![NO_KEY_PHRASES]);
        assert_eq!(identify_potential_issues(""), vec![NO_ISSUES]);
    }

    #[test]
    fn plain_greeting_yields_sentinels() {
        let result = analyze("Hello world.");
        assert_eq!(result.summary, "Hello world.");
        assert_eq!(result.key_points, vec![NO_KEY_PHRASES]);
        assert_eq!(result.potential_issues, vec![NO_ISSUES]);
    }

    #[test]
    fn contract_key_phrases_are_matching_sentences() {
        let phrases = extract_key_phrases(CONTRACT);
        assert_eq!(
            phrases,
            vec![
                "This agreement may be subject to termination",
                "The parties agree to indemnify each other",
                "Governing law is California",
            ]
        );
    }

    #[test]
    fn contract_issues_follow_table_order() {
        assert_eq!(
            identify_potential_issues(CONTRACT),
            vec![
                "Contains termination clauses that may affect rights",
                "Contains indemnification clauses",
                "Specifies governing law which may affect interpretation",
            ]
        );
    }

    #[test]
    fn key_phrases_are_capped_at_five() {
        let text = (1..=8)
            .map(|i| format!("Clause {i} applies"))
            .collect::<Vec<_>>()
            .join(". ");
        let phrases = extract_key_phrases(&text);
        assert_eq!(phrases.len(), 5);
        assert_eq!(phrases[0], "Clause 1 applies");
        assert_eq!(phrases[4], "Clause 5 applies");
    }

    #[test]
    fn issues_are_capped_at_three_in_table_order() {
        // Mentions every trigger, listed in reverse table order.
        let text = "Default. Amendment. Assignment. Governed. Dispute. \
Indemnity. Confidential. Warranty. Liability. Termination.";
        assert_eq!(
            identify_potential_issues(text),
            vec![
                "Contains termination clauses that may affect rights",
                "Contains liability limitations or waivers",
                "Contains warranty provisions or disclaimers",
            ]
        );
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(
            identify_potential_issues("NonLiability"),
            vec!["Contains liability limitations or waivers"]
        );
        // "term" hides inside "determined".
        assert_eq!(
            extract_key_phrases("The outcome is DETERMINED later"),
            vec!["The outcome is DETERMINED later"]
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        assert_eq!(analyze(CONTRACT), analyze(CONTRACT));
    }
}

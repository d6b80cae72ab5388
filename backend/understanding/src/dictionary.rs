//! Static reference data for the analyzer.
//!
//! Matching against both tables is lower-cased substring containment, so
//! stems like `liabil` deliberately catch "liability", "liable" and
//! "NonLiability" alike.

/// Legal vocabulary used to flag key-phrase sentences.
pub const LEGAL_TERMS: &[&str] = &[
    "agreement",
    "contract",
    "party",
    "parties",
    "clause",
    "section",
    "term",
    "provision",
    "liability",
    "damages",
    "indemnity",
    "warranty",
    "termination",
    "confidential",
    "intellectual property",
    "governing law",
    "jurisdiction",
    "arbitration",
    "dispute",
    "breach",
    "default",
    "remedy",
    "force majeure",
    "assignment",
    "waiver",
    "amendment",
];

/// A trigger stem and the canned issue it raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueTrigger {
    pub stem: &'static str,
    pub issue: &'static str,
}

/// Issue triggers in reporting order.
pub const ISSUE_TRIGGERS: &[IssueTrigger] = &[
    IssueTrigger { stem: "terminat", issue: "Contains termination clauses that may affect rights" },
    IssueTrigger { stem: "liabil", issue: "Contains liability limitations or waivers" },
    IssueTrigger { stem: "warrant", issue: "Contains warranty provisions or disclaimers" },
    IssueTrigger { stem: "confiden", issue: "Contains confidentiality requirements" },
    IssueTrigger { stem: "indemn", issue: "Contains indemnification clauses" },
    IssueTrigger { stem: "dispute", issue: "Contains dispute resolution mechanisms" },
    IssueTrigger { stem: "govern", issue: "Specifies governing law which may affect interpretation" },
    IssueTrigger { stem: "assign", issue: "Contains assignment restrictions or requirements" },
    IssueTrigger { stem: "amend", issue: "Specifies amendment procedures" },
    IssueTrigger { stem: "default", issue: "Defines events of default and consequences" },
];

pub const NO_KEY_PHRASES: &str = "No key phrases identified";
pub const NO_ISSUES: &str = "No specific legal issues identified";

pub const MAX_KEY_PHRASES: usize = 5;
pub const MAX_ISSUES: usize = 3;
pub const SUMMARY_SENTENCES: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_lowercase() {
        for term in LEGAL_TERMS {
            assert_eq!(*term, term.to_lowercase());
        }
        for trigger in ISSUE_TRIGGERS {
            assert_eq!(trigger.stem, trigger.stem.to_lowercase());
        }
    }

    #[test]
    fn table_sizes() {
        assert_eq!(LEGAL_TERMS.len(), 26);
        assert_eq!(ISSUE_TRIGGERS.len(), 10);
    }
}

//! Classification of free-text vote positions and roll-call outcomes.

use std::collections::HashSet;

use pv_text::fold;

use super::types::{Outcome, Position};

impl Position {
    /// Classify an upstream position string.
    ///
    /// Case-insensitive substring match, checked in the order pour, contre,
    /// abstention: upstream strings carry suffixes such as `"contre (exprimé)"`.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        if lowered.contains("pour") {
            Self::For
        } else if lowered.contains("contre") {
            Self::Against
        } else if lowered.contains("abstention") {
            Self::Abstain
        } else {
            Self::Absent
        }
    }

    /// French display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::For => "Pour",
            Self::Against => "Contre",
            Self::Abstain => "Abstention",
            Self::Absent => "Absent",
        }
    }
}

impl Outcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adopted => "Adopté",
            Self::Rejected => "Rejeté",
        }
    }
}

/// Maps raw outcome strings onto [`Outcome`].
///
/// A string is adopted when, folded (lowercase, no diacritics, trimmed), it
/// equals one of the configured spellings; anything else is rejected.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    adopted: HashSet<String>,
}

impl OutcomeClassifier {
    pub fn new<I, S>(spellings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            adopted: spellings
                .into_iter()
                .map(|s| fold(s.as_ref().trim()))
                .collect(),
        }
    }

    #[must_use]
    pub fn classify(&self, raw: &str) -> Outcome {
        if self.adopted.contains(&fold(raw.trim())) {
            Outcome::Adopted
        } else {
            Outcome::Rejected
        }
    }
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::new(["adopte", "adoptee", "adopté", "adoptée"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_cases() {
        let cases = [
            ("Pour", Position::For),
            ("pour", Position::For),
            ("contre (exprimé)", Position::Against),
            ("CONTRE", Position::Against),
            ("abstention", Position::Abstain),
            ("Abstention volontaire", Position::Abstain),
            ("nonVotant", Position::Absent),
            ("", Position::Absent),
        ];

        for (raw, expected) in cases {
            assert_eq!(Position::classify(raw), expected, "case '{raw}'");
        }
    }

    #[test]
    fn outcome_cases() {
        let classifier = OutcomeClassifier::default();
        let cases = [
            ("adopté", Outcome::Adopted),
            ("adoptee", Outcome::Adopted),
            ("ADOPTE", Outcome::Adopted),
            ("Adoptée", Outcome::Adopted),
            (" adopte ", Outcome::Adopted),
            ("rejeté", Outcome::Rejected),
            ("rejete", Outcome::Rejected),
            ("non adopté", Outcome::Rejected),
            ("quelque chose", Outcome::Rejected),
            ("", Outcome::Rejected),
        ];

        for (raw, expected) in cases {
            assert_eq!(classifier.classify(raw), expected, "case '{raw}'");
        }
    }

    #[test]
    fn test_custom_spellings() {
        let classifier = OutcomeClassifier::new(["approuvé"]);
        assert_eq!(classifier.classify("APPROUVE"), Outcome::Adopted);
        assert_eq!(classifier.classify("adopté"), Outcome::Rejected);
    }
}

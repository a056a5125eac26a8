//! Scripted responder: keyword rules that pick a canned answer.
//!
//! Rules are checked in order against the lower-cased question:
//! - "passport" and "renew" → Renewal
//! - "passport" and "fee" → Fees
//! - "passport" and "photo" → Photos
//!
//! First match wins. Anything else falls back to General, so every
//! question gets an answer.

use serde::Serialize;
use tracing::debug;

use super::canned::{self, QaCategory, QaEntry};

/// A rule that fires when every required substring is present.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeywordRule {
    pub(crate) required: &'static [&'static str],
    pub(crate) category: QaCategory,
}

impl KeywordRule {
    fn matches(&self, lowered: &str) -> bool {
        self.required.iter().all(|kw| lowered.contains(kw))
    }
}

/// Priority-ordered rules. Order is significant.
pub(crate) static DEFAULT_RULES: &[KeywordRule] = &[
    KeywordRule {
        required: &["passport", "renew"],
        category: QaCategory::Renewal,
    },
    KeywordRule {
        required: &["passport", "fee"],
        category: QaCategory::Fees,
    },
    KeywordRule {
        required: &["passport", "photo"],
        category: QaCategory::Photos,
    },
];

/// Answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub category: QaCategory,
    pub title: String,
    pub body: String,
    pub related_questions: Vec<String>,
}

impl Answer {
    fn from_entry(category: QaCategory, entry: QaEntry) -> Self {
        Self {
            category,
            title: entry.title.to_string(),
            body: entry.body.to_string(),
            related_questions: entry
                .related_questions
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }
}

pub struct ScriptedResponder {
    rules: &'static [KeywordRule],
    lookup: fn(QaCategory) -> QaEntry,
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedResponder {
    /// Responder with the default rules and canned dictionary.
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES,
            lookup: canned::entry,
        }
    }

    /// Swap the canned-text dictionary, keeping the rules.
    #[cfg(test)]
    pub(crate) fn with_lookup(mut self, lookup: fn(QaCategory) -> QaEntry) -> Self {
        self.lookup = lookup;
        self
    }

    /// Category for a question, without building the answer.
    pub fn classify(&self, question: &str) -> QaCategory {
        let lowered = question.to_lowercase();
        let category = self
            .rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(QaCategory::General, |rule| rule.category);
        debug!(?category, "Question classified");
        category
    }

    pub fn answer(&self, question: &str) -> Answer {
        let category = self.classify(question);
        Answer::from_entry(category, (self.lookup)(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renewal_question() {
        let responder = ScriptedResponder::new();
        let answer = responder.answer("How do I renew my passport?");
        assert_eq!(answer.category, QaCategory::Renewal);
        assert_eq!(answer.title, "How to Renew Your Passport");
        assert_eq!(answer.related_questions.len(), 3);
    }

    #[test]
    fn fee_question() {
        let responder = ScriptedResponder::new();
        assert_eq!(responder.answer("passport fee").category, QaCategory::Fees);
    }

    #[test]
    fn photo_question() {
        let responder = ScriptedResponder::new();
        assert_eq!(
            responder.classify("What size is a PASSPORT Photo?"),
            QaCategory::Photos
        );
    }

    #[test]
    fn fallback_question() {
        let responder = ScriptedResponder::new();
        let answer = responder.answer("tell me about dogs");
        assert_eq!(answer.category, QaCategory::General);
        assert_eq!(answer.title, "Passport Information");
    }

    #[test]
    fn needs_every_keyword() {
        let responder = ScriptedResponder::new();
        assert_eq!(responder.classify("how do I renew?"), QaCategory::General);
        assert_eq!(responder.classify("what is the fee"), QaCategory::General);
        assert_eq!(responder.classify(""), QaCategory::General);
    }

    #[test]
    fn earlier_rule_wins() {
        let responder = ScriptedResponder::new();
        // Matches renew, fee and photo rules; renewal is first.
        assert_eq!(
            responder.classify("passport renewal fee and photo"),
            QaCategory::Renewal
        );
        // Matches fee and photo rules; fee is before photo.
        assert_eq!(
            responder.classify("passport photo fee"),
            QaCategory::Fees
        );
    }

    #[test]
    fn keywords_match_as_substrings() {
        let responder = ScriptedResponder::new();
        assert_eq!(
            responder.classify("Passports and photographs"),
            QaCategory::Photos
        );
        assert_eq!(responder.classify("passport feedback"), QaCategory::Fees);
    }

    #[test]
    fn related_questions_resolve() {
        let responder = ScriptedResponder::new();
        for category in [
            QaCategory::Renewal,
            QaCategory::Fees,
            QaCategory::Photos,
            QaCategory::General,
        ] {
            for q in canned::entry(category).related_questions {
                // Every follow-up gets some answer; none panic or come back empty.
                assert!(!responder.answer(q).body.is_empty());
            }
        }
        assert_eq!(
            responder.classify("What documents do I need for passport renewal?"),
            QaCategory::Renewal
        );
    }

    #[test]
    fn custom_lookup_keeps_rules() {
        fn terse(_: QaCategory) -> QaEntry {
            QaEntry {
                title: "t",
                body: "b",
                related_questions: &[],
            }
        }
        let responder = ScriptedResponder::new().with_lookup(terse);
        let answer = responder.answer("passport fee");
        assert_eq!(answer.category, QaCategory::Fees);
        assert_eq!(answer.body, "b");
        assert!(answer.related_questions.is_empty());
    }
}

//! Canned Q&A dictionary. Pure display text, one entry per category.

use serde::{Deserialize, Serialize};

/// Which canned answer a question resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaCategory {
    Renewal,
    Fees,
    Photos,
    General,
}

/// A canned answer with its "People also ask" follow-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaEntry {
    pub title: &'static str,
    pub body: &'static str,
    pub related_questions: &'static [&'static str],
}

/// Look up the canned entry for a category.
pub fn entry(category: QaCategory) -> QaEntry {
    match category {
        QaCategory::Renewal => QaEntry {
            title: "How to Renew Your Passport",
            body: "To renew your passport, you'll need to submit Form DS-82 by mail if you \
                   meet certain criteria. Your passport must be undamaged, issued when you \
                   were 16 or older, and issued within the last 15 years.",
            related_questions: &[
                "What documents do I need for passport renewal?",
                "How long does passport renewal take?",
                "Can I renew my passport online?",
            ],
        },
        QaCategory::Fees => QaEntry {
            title: "Passport Fees",
            body: "Current passport fees are: Adult passport book - $130, Adult passport \
                   card - $30, Both book and card - $160. Additional execution fee of $35 \
                   applies for first-time applicants.",
            related_questions: &[
                "Are there expedited passport fees?",
                "What payment methods are accepted?",
                "Can I get a refund on passport fees?",
            ],
        },
        QaCategory::Photos => QaEntry {
            title: "Passport Photo Requirements",
            body: "Passport photos must be 2x2 inches, taken within the last 6 months, with \
                   a white background. You must have a neutral expression with both eyes open.",
            related_questions: &[
                "Can I take my own passport photo?",
                "Where can I get passport photos taken?",
                "What should I wear for passport photos?",
            ],
        },
        QaCategory::General => QaEntry {
            title: "Passport Information",
            body: "I can help you with various passport-related questions including \
                   applications, renewals, fees, photo requirements, and processing times. \
                   Please ask a specific question.",
            related_questions: &[
                "How do I apply for a new passport?",
                "What are current passport processing times?",
                "Do I need a passport for international travel?",
            ],
        },
    }
}

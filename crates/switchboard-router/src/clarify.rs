// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clarification handling: which required fields a request is missing, and
//! which canned follow-up questions to ask for them.
//!
//! The outcome gates dispatch: a decision that requires clarification is
//! presented back to the user instead of being forwarded to a specialist.

use crate::decision::{Entity, IntentCategory};
use crate::entities::has_entity_type;

/// Requests shorter than this many words always need clarification.
const MIN_REQUEST_WORDS: usize = 3;
/// A code request needs at least this many words to count as described.
const MIN_TASK_DESCRIPTION_WORDS: usize = 5;
/// A search request needs at least this many residual characters once the
/// search verbs are stripped.
const MIN_QUERY_CHARS: usize = 3;
/// A reminder needs at least this many residual words to count as carrying
/// a message.
const MIN_MESSAGE_WORDS: usize = 2;
/// At most this many follow-up questions are surfaced.
const MAX_QUESTIONS: usize = 3;

const GENERIC_QUESTION: &str = "Could you provide more details?";

/// The clarification set attached to an under-specified decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Clarification {
    pub missing_fields: Vec<String>,
    pub suggested_questions: Vec<String>,
}

/// Fields a category needs before dispatch, in presentation order.
pub fn required_fields(category: IntentCategory) -> &'static [&'static str] {
    match category {
        IntentCategory::Code => &["programming language", "task description"],
        IntentCategory::Vision => &["image source"],
        IntentCategory::Email => &["action"],
        IntentCategory::Search => &["search query"],
        IntentCategory::Reminder => &["time", "message"],
        IntentCategory::Analysis => &["subject"],
        IntentCategory::General | IntentCategory::Unknown => &["query"],
    }
}

/// Decide whether a request needs clarification and, if so, which fields are
/// missing and what to ask.
///
/// Returns `None` when the request is specific enough to dispatch. A `Some`
/// result always carries at least one missing field and between one and
/// three questions.
pub fn check(category: IntentCategory, text: &str, entities: &[Entity]) -> Option<Clarification> {
    let mut missing = detect_missing(category, text, entities);

    let too_short = word_count(text) < MIN_REQUEST_WORDS;
    if missing.is_empty() {
        if !too_short {
            return None;
        }
        // The request is too short for any field detector to fire; report
        // the category's leading required field so the missing list is
        // never empty on a clarification.
        if let Some(first) = required_fields(category).first() {
            missing.push((*first).to_string());
        }
    }

    let suggested_questions = questions_for(category, &missing);
    Some(Clarification {
        missing_fields: missing,
        suggested_questions,
    })
}

/// Run the per-field detectors for a category.
fn detect_missing(category: IntentCategory, text: &str, entities: &[Entity]) -> Vec<String> {
    let mut missing = Vec::new();

    match category {
        IntentCategory::Code => {
            if !has_entity_type(entities, "language") {
                missing.push("programming language".to_string());
            }
            if word_count(text) < MIN_TASK_DESCRIPTION_WORDS {
                missing.push("task description".to_string());
            }
        }
        IntentCategory::Reminder => {
            if !has_entity_type(entities, "time") {
                missing.push("time".to_string());
            }
            if reminder_message_words(text, entities) < MIN_MESSAGE_WORDS {
                missing.push("message".to_string());
            }
        }
        IntentCategory::Search => {
            if residual_query(text).chars().count() < MIN_QUERY_CHARS {
                missing.push("search query".to_string());
            }
        }
        _ => {}
    }

    missing
}

/// Map missing fields to canned questions, capped at three.
///
/// Fields with no category-specific template are skipped; an empty result
/// degrades to a single generic question.
pub fn questions_for(category: IntentCategory, missing_fields: &[String]) -> Vec<String> {
    let templates = question_templates(category);

    let mut questions: Vec<String> = missing_fields
        .iter()
        .filter_map(|field| {
            templates
                .iter()
                .find(|(name, _)| *name == field.as_str())
                .map(|(_, question)| (*question).to_string())
        })
        .collect();

    if questions.is_empty() {
        questions.push(GENERIC_QUESTION.to_string());
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

fn question_templates(category: IntentCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        IntentCategory::Code => &[
            (
                "programming language",
                "What programming language would you like me to use?",
            ),
            (
                "task description",
                "Could you describe in more detail what the code should do?",
            ),
        ],
        IntentCategory::Vision => &[(
            "image source",
            "Please upload the image you'd like me to analyze.",
        )],
        IntentCategory::Email => &[(
            "action",
            "Would you like to check, reply to, or compose an email?",
        )],
        IntentCategory::Search => &[("search query", "What would you like me to search for?")],
        IntentCategory::Reminder => &[
            ("time", "When would you like me to remind you?"),
            ("message", "What should I remind you about?"),
        ],
        _ => &[],
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// What remains of a search request once the search verbs are stripped.
fn residual_query(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| {
            let w = word.to_lowercase();
            w != "search" && w != "find"
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count the words of a reminder that could form the reminder message:
/// everything except the trigger words and any detected time values.
fn reminder_message_words(text: &str, entities: &[Entity]) -> usize {
    let time_values: Vec<String> = entities
        .iter()
        .filter(|e| e.entity_type == "time")
        .map(|e| e.value.to_lowercase())
        .collect();

    text.split_whitespace()
        .filter(|word| {
            let w = word.to_lowercase();
            if matches!(w.as_str(), "remind" | "reminder" | "me" | "please") {
                return false;
            }
            !time_values.iter().any(|t| t.contains(&w))
        })
        .count()
}

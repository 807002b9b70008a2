// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic entity extraction from request text.
//!
//! Pulls structured hints (programming language, email address, time
//! expression) out of raw text with fixed patterns. Total and side-effect
//! free: extraction never fails, it just returns fewer entities.

use std::sync::LazyLock;

use regex::Regex;

use crate::decision::Entity;

/// Programming-language vocabulary matched as whole words.
const LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "go",
    "rust",
    "c++",
    "c#",
    "php",
    "ruby",
    "swift",
    "kotlin",
];

/// Confidence for vocabulary-matched languages.
const LANGUAGE_CONFIDENCE: f32 = 0.9;
/// Confidence for pattern-matched email addresses.
const EMAIL_CONFIDENCE: f32 = 1.0;
/// Confidence for pattern-matched time expressions.
const TIME_CONFIDENCE: f32 = 0.8;

static LANGUAGE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    LANGUAGES
        .iter()
        .map(|lang| {
            // Names ending in a symbol ("c++", "c#") cannot take a trailing
            // word boundary.
            let trailing = if lang.ends_with(|c: char| c.is_alphanumeric()) {
                r"\b"
            } else {
                ""
            };
            let pattern = format!(r"(?i)\b{}{trailing}", regex::escape(lang));
            (*lang, Regex::new(&pattern).expect("language pattern compiles"))
        })
        .collect()
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern compiles")
});

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)\b").expect("time pattern compiles")
});

/// Extract all recognizable entities from `text`.
///
/// Output order is fixed: language entities first (in vocabulary order),
/// then email addresses, then time expressions. Callers that consult a
/// single field take the first match of the relevant type.
pub fn extract(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();

    for (lang, pattern) in LANGUAGE_PATTERNS.iter() {
        if pattern.is_match(text) {
            entities.push(Entity::new("language", *lang, LANGUAGE_CONFIDENCE));
        }
    }

    for m in EMAIL_PATTERN.find_iter(text) {
        entities.push(Entity::new("email", m.as_str(), EMAIL_CONFIDENCE));
    }

    for m in TIME_PATTERN.find_iter(text) {
        entities.push(Entity::new("time", m.as_str(), TIME_CONFIDENCE));
    }

    entities
}

/// Returns true if any extracted entity carries the given type tag.
pub fn has_entity_type(entities: &[Entity], entity_type: &str) -> bool {
    entities.iter().any(|e| e.entity_type == entity_type)
}

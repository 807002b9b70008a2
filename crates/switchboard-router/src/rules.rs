// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic rule-based classification.
//!
//! The fallback path behind the model-backed classifier: keyword overlap
//! for category, trigger phrases for priority, length and indicator
//! heuristics for complexity. Always succeeds, always at the fixed fallback
//! confidence, so two runs over identical text produce identical decisions.

use std::sync::LazyLock;

use regex::Regex;

use crate::clarify;
use crate::decision::{ComplexityLevel, IntentCategory, PriorityLevel, RoutingDecision};
use crate::entities;
use crate::selection::SelectionMatrix;

/// Confidence of a keyword-derived decision.
const RULE_CONFIDENCE: f32 = 0.6;
/// Confidence of the greeting short-circuit.
const GREETING_CONFIDENCE: f32 = 0.95;

/// Complexity boundaries: requests under `SIMPLE_WORD_LIMIT` words are
/// simple; indicator-free requests over `MEDIUM_WORD_LIMIT` words are medium.
const SIMPLE_WORD_LIMIT: usize = 5;
const MEDIUM_WORD_LIMIT: usize = 20;

/// Category keyword lists, in registration order. Ties on hit count keep
/// the earliest-registered category.
const CATEGORY_KEYWORDS: &[(IntentCategory, &[&str])] = &[
    (
        IntentCategory::Code,
        &[
            "code", "program", "script", "function", "class", "method", "python", "javascript",
            "java", "go", "rust", "c++", "api", "algorithm", "debug", "compile", "execute", "run",
            "test", "write", "implement", "develop", "programming", "software",
        ],
    ),
    (
        IntentCategory::Vision,
        &[
            "image", "picture", "photo", "vision", "see", "look", "ocr", "extract text",
            "recognize", "detect", "identify", "visual", "camera", "scan", "document", "receipt",
            "face",
        ],
    ),
    (
        IntentCategory::Email,
        &[
            "email", "mail", "inbox", "send", "reply", "forward", "outlook", "gmail", "message",
            "compose", "draft",
        ],
    ),
    (
        IntentCategory::Search,
        &[
            "search", "find", "look up", "google", "internet", "web", "online", "research",
            "information about", "what is", "who is", "how to", "when did",
        ],
    ),
    (
        IntentCategory::Reminder,
        &[
            "remind", "reminder", "alert", "notify", "notification", "schedule", "calendar",
            "appointment", "meeting", "remember", "don't forget", "todo", "task",
        ],
    ),
    (
        IntentCategory::Analysis,
        &[
            "analyze", "analysis", "explain", "understand", "summarize", "summarise", "compare",
            "contrast", "evaluate", "assess", "review", "study", "examine", "reasoning", "logic",
            "math", "calculate", "compute",
        ],
    ),
];

/// Priority trigger phrases in scan order; the first phrase found wins.
const PRIORITY_TRIGGERS: &[(&str, PriorityLevel)] = &[
    ("urgent", PriorityLevel::Urgent),
    ("asap", PriorityLevel::Urgent),
    ("immediately", PriorityLevel::Urgent),
    ("critical", PriorityLevel::Urgent),
    ("emergency", PriorityLevel::Urgent),
    ("deadline", PriorityLevel::Urgent),
    ("as soon as possible", PriorityLevel::Urgent),
    ("right now", PriorityLevel::Urgent),
    ("high priority", PriorityLevel::High),
    ("important", PriorityLevel::High),
    ("quick", PriorityLevel::High),
    ("fast", PriorityLevel::High),
    ("normal", PriorityLevel::Normal),
    ("regular", PriorityLevel::Normal),
    ("low priority", PriorityLevel::Low),
    ("when you have time", PriorityLevel::Low),
    ("not urgent", PriorityLevel::Low),
    ("whenever", PriorityLevel::Low),
];

const COMPLEX_INDICATORS: &[&str] = &[
    "complex",
    "difficult",
    "advanced",
    "sophisticated",
    "architecture",
    "design pattern",
    "optimization",
];

const VERY_COMPLEX_INDICATORS: &[&str] = &[
    "machine learning",
    "neural network",
    "deep learning",
    "enterprise",
    "production",
    "scalable",
    "distributed system",
];

/// Greetings are matched as whole words so "hi" inside "machine" does not
/// short-circuit classification.
static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:hello|hi|hey|greetings|howdy|hola|good morning|good afternoon|good evening)\b",
    )
    .expect("greeting pattern compiles")
});

/// The deterministic fallback classifier.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    matrix: SelectionMatrix,
}

impl RuleClassifier {
    pub fn new(matrix: SelectionMatrix) -> Self {
        Self { matrix }
    }

    /// Classify `text` with keyword rules alone. Total: every input yields a
    /// decision, marked `fallback_used`.
    pub fn classify(&self, text: &str) -> RoutingDecision {
        if GREETING_PATTERN.is_match(text) {
            return self.greeting_decision();
        }

        let lower = text.to_lowercase();
        let category = detect_category(&lower);
        let priority = detect_priority(&lower);
        let complexity = detect_complexity(text, &lower);
        let entities = entities::extract(text);
        let specialist_model = self.matrix.select(category, priority, complexity, &entities);

        let clarification = clarify::check(category, text, &entities);
        let (requires_clarification, missing_fields, suggested_questions) = match clarification {
            Some(c) => (true, c.missing_fields, c.suggested_questions),
            None => (false, Vec::new(), Vec::new()),
        };

        RoutingDecision {
            category,
            priority,
            complexity,
            specialist_model,
            confidence: RULE_CONFIDENCE,
            requires_clarification,
            missing_fields,
            entities,
            suggested_questions,
            processing_time_ms: 0.0,
            fallback_used: true,
        }
    }

    /// A recognized greeting bypasses category logic entirely.
    fn greeting_decision(&self) -> RoutingDecision {
        let category = IntentCategory::General;
        let priority = PriorityLevel::Normal;
        let complexity = ComplexityLevel::Simple;
        let specialist_model = self.matrix.select(category, priority, complexity, &[]);

        RoutingDecision {
            category,
            priority,
            complexity,
            specialist_model,
            confidence: GREETING_CONFIDENCE,
            requires_clarification: false,
            missing_fields: Vec::new(),
            entities: Vec::new(),
            suggested_questions: Vec::new(),
            processing_time_ms: 0.0,
            fallback_used: true,
        }
    }
}

/// Pick the category with the strictly greatest keyword hit count.
fn detect_category(lower: &str) -> IntentCategory {
    let mut best = IntentCategory::General;
    let mut best_hits = 0usize;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let hits = keywords.iter().filter(|k| lower.contains(*k)).count();
        if hits > best_hits {
            best_hits = hits;
            best = *category;
        }
    }

    best
}

/// First trigger phrase found in the text wins; no trigger means normal.
fn detect_priority(lower: &str) -> PriorityLevel {
    PRIORITY_TRIGGERS
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, level)| *level)
        .unwrap_or(PriorityLevel::Normal)
}

/// Length and indicator heuristics; the very-complex list is checked before
/// the complex list.
fn detect_complexity(text: &str, lower: &str) -> ComplexityLevel {
    let word_count = text.split_whitespace().count();
    if word_count < SIMPLE_WORD_LIMIT {
        return ComplexityLevel::Simple;
    }

    if VERY_COMPLEX_INDICATORS.iter().any(|i| lower.contains(i)) {
        return ComplexityLevel::VeryComplex;
    }

    if COMPLEX_INDICATORS.iter().any(|i| lower.contains(i)) {
        return ComplexityLevel::Complex;
    }

    if word_count > MEDIUM_WORD_LIMIT {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::Simple
    }
}

// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing decision value object and its closed enum sets.
//!
//! `RoutingDecision` is constructed fresh per request, never mutated after
//! validation completes, and carries everything the dispatch layer needs:
//! the classified intent, the chosen specialist model, and the clarification
//! set when the request is under-specified.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// User intent categories. Closed set: a model-backed classification naming
/// anything else fails deserialization and falls back to the rule-based path.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Code,
    Vision,
    Email,
    Search,
    Reminder,
    Analysis,
    General,
    Unknown,
}

/// Priority levels for task handling. Lower is more urgent; `Ord` follows
/// declaration order so `priority <= PriorityLevel::High` selects the urgent
/// half of the scale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(try_from = "u8", into = "u8")]
pub enum PriorityLevel {
    Urgent,
    High,
    Normal,
    Low,
    Background,
}

impl PriorityLevel {
    /// The numeric wire value (1 = most urgent, 5 = background).
    pub fn as_u8(self) -> u8 {
        match self {
            PriorityLevel::Urgent => 1,
            PriorityLevel::High => 2,
            PriorityLevel::Normal => 3,
            PriorityLevel::Low => 4,
            PriorityLevel::Background => 5,
        }
    }
}

impl From<PriorityLevel> for u8 {
    fn from(level: PriorityLevel) -> u8 {
        level.as_u8()
    }
}

impl TryFrom<u8> for PriorityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PriorityLevel::Urgent),
            2 => Ok(PriorityLevel::High),
            3 => Ok(PriorityLevel::Normal),
            4 => Ok(PriorityLevel::Low),
            5 => Ok(PriorityLevel::Background),
            other => Err(format!("priority must be within 1-5, got {other}")),
        }
    }
}

/// Task complexity levels, ordered from simple to very complex.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
    VeryComplex,
}

/// A structured fact extracted from free text (language, email, time, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type tag. Deterministic extraction emits `language`, `email`,
    /// and `time`; model-backed classification may add others (e.g. `task`).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// The extracted value.
    pub value: String,
    /// Extraction confidence (0.0-1.0).
    #[serde(default = "default_entity_confidence")]
    pub confidence: f32,
}

fn default_entity_confidence() -> f32 {
    0.8
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, value: impl Into<String>, confidence: f32) -> Self {
        Self {
            entity_type: entity_type.into(),
            value: value.into(),
            confidence,
        }
    }
}

/// Optional per-user profile supplied by the caller to sharpen model-backed
/// classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// The user's preferred programming language, if known.
    pub preferred_language: Option<String>,
    /// The category of the user's previous request, if any.
    pub last_category: Option<IntentCategory>,
    /// Self-reported expertise level (e.g. "beginner", "expert").
    pub expertise: Option<String>,
}

/// Complete routing decision for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Classified intent category.
    pub category: IntentCategory,
    /// Urgency priority (1 = most urgent).
    pub priority: PriorityLevel,
    /// Complexity tier.
    pub complexity: ComplexityLevel,
    /// The downstream model chosen to handle the request. Always present in
    /// the deployment's capability registry.
    pub specialist_model: String,
    /// Classification confidence (0.0-1.0).
    pub confidence: f32,
    /// Whether the request must be clarified before dispatch.
    pub requires_clarification: bool,
    /// Required fields found missing; non-empty whenever
    /// `requires_clarification` is set.
    pub missing_fields: Vec<String>,
    /// Entities extracted from the request text.
    pub entities: Vec<Entity>,
    /// Follow-up questions to present to the user (at most 3).
    pub suggested_questions: Vec<String>,
    /// Wall-clock time spent classifying, in milliseconds.
    pub processing_time_ms: f64,
    /// Whether the deterministic fallback produced (or amended) this decision.
    pub fallback_used: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trips_through_strings() {
        for cat in [
            IntentCategory::Code,
            IntentCategory::Vision,
            IntentCategory::Email,
            IntentCategory::Search,
            IntentCategory::Reminder,
            IntentCategory::Analysis,
            IntentCategory::General,
            IntentCategory::Unknown,
        ] {
            let s = cat.to_string();
            assert_eq!(IntentCategory::from_str(&s).unwrap(), cat);
        }
    }

    #[test]
    fn category_rejects_values_outside_closed_set() {
        assert!(serde_json::from_str::<IntentCategory>("\"poetry\"").is_err());
        assert!(IntentCategory::from_str("poetry").is_err());
    }

    #[test]
    fn priority_serializes_as_integer() {
        let json = serde_json::to_string(&PriorityLevel::Urgent).unwrap();
        assert_eq!(json, "1");
        let parsed: PriorityLevel = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, PriorityLevel::Normal);
    }

    #[test]
    fn priority_rejects_out_of_range() {
        assert!(serde_json::from_str::<PriorityLevel>("0").is_err());
        assert!(serde_json::from_str::<PriorityLevel>("6").is_err());
    }

    #[test]
    fn lower_priority_value_is_more_urgent() {
        assert!(PriorityLevel::Urgent < PriorityLevel::High);
        assert!(PriorityLevel::High < PriorityLevel::Normal);
        assert!(PriorityLevel::Urgent <= PriorityLevel::High);
        assert!(PriorityLevel::Normal > PriorityLevel::High);
    }

    #[test]
    fn complexity_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&ComplexityLevel::VeryComplex).unwrap();
        assert_eq!(json, "\"very_complex\"");
        let parsed: ComplexityLevel = serde_json::from_str("\"very_complex\"").unwrap();
        assert_eq!(parsed, ComplexityLevel::VeryComplex);
        assert!(serde_json::from_str::<ComplexityLevel>("\"impossible\"").is_err());
    }

    #[test]
    fn entity_deserializes_with_default_confidence() {
        let entity: Entity =
            serde_json::from_str(r#"{"type": "language", "value": "python"}"#).unwrap();
        assert_eq!(entity.entity_type, "language");
        assert_eq!(entity.value, "python");
        assert_eq!(entity.confidence, 0.8);
    }

    #[test]
    fn decision_serializes_with_wire_field_names() {
        let decision = RoutingDecision {
            category: IntentCategory::Code,
            priority: PriorityLevel::Normal,
            complexity: ComplexityLevel::Medium,
            specialist_model: "qwen2.5-coder:7b".to_string(),
            confidence: 0.95,
            requires_clarification: false,
            missing_fields: vec![],
            entities: vec![Entity::new("language", "python", 0.9)],
            suggested_questions: vec![],
            processing_time_ms: 85.3,
            fallback_used: false,
        };

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["category"], "code");
        assert_eq!(json["priority"], 3);
        assert_eq!(json["complexity"], "medium");
        assert_eq!(json["entities"][0]["type"], "language");
    }
}

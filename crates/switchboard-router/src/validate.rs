// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decision validation and the escalation policy.
//!
//! Normalizes confidence, discards under-confident model-backed results in
//! favor of the deterministic path, and rewrites models the capability
//! registry does not know. A low-confidence model answer is never trusted
//! over the rule-based fallback.

use std::sync::Arc;

use tracing::warn;

use crate::decision::{ComplexityLevel, IntentCategory, PriorityLevel, RoutingDecision};
use crate::registry::ModelRegistry;
use crate::rules::RuleClassifier;

/// Confidence reported by the safe-fallback decision.
const SAFE_FALLBACK_CONFIDENCE: f32 = 0.3;

const SAFE_FALLBACK_QUESTION: &str = "Could you please rephrase your request?";

/// Validates decisions against the escalation policy and the registry.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<ModelRegistry>,
    confidence_threshold: f32,
}

impl Validator {
    pub fn new(registry: Arc<ModelRegistry>, confidence_threshold: f32) -> Self {
        Self {
            registry,
            confidence_threshold,
        }
    }

    /// Validate a decision, possibly replacing it wholesale.
    ///
    /// Steps, in order: clamp confidence into [0, 1]; re-route an
    /// under-confident model-backed result through `rules`; substitute the
    /// default model when the chosen one is not registered.
    pub fn validate(
        &self,
        mut decision: RoutingDecision,
        text: &str,
        rules: &RuleClassifier,
    ) -> RoutingDecision {
        decision.confidence = decision.confidence.clamp(0.0, 1.0);

        if !decision.fallback_used && decision.confidence < self.confidence_threshold {
            warn!(
                confidence = decision.confidence,
                threshold = self.confidence_threshold,
                "low-confidence classification, using rule-based fallback"
            );
            decision = rules.classify(text);
        }

        if !self.registry.is_known(&decision.specialist_model) {
            warn!(
                model = %decision.specialist_model,
                default = %self.registry.default_model(),
                "selected model not in capability registry, substituting default"
            );
            decision.specialist_model = self.registry.default_model().to_string();
            decision.fallback_used = true;
        }

        decision
    }

    /// The fixed decision returned when the pipeline fails unexpectedly.
    ///
    /// Forces clarification so the user restates the request rather than
    /// receiving a misrouted answer.
    pub fn safe_fallback(&self) -> RoutingDecision {
        RoutingDecision {
            category: IntentCategory::General,
            priority: PriorityLevel::Normal,
            complexity: ComplexityLevel::Medium,
            specialist_model: self.registry.default_model().to_string(),
            confidence: SAFE_FALLBACK_CONFIDENCE,
            requires_clarification: true,
            missing_fields: vec!["query".to_string()],
            entities: Vec::new(),
            suggested_questions: vec![SAFE_FALLBACK_QUESTION.to_string()],
            processing_time_ms: 0.0,
            fallback_used: true,
        }
    }
}

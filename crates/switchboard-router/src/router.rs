// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing entry point.
//!
//! One classification attempt against the completion service, then --
//! conditionally -- one deterministic fallback attempt, never both
//! concurrently: the fallback overrides the primary result, it does not race
//! it. `classify` is infallible; whatever goes wrong inside the pipeline,
//! the caller receives a well-formed decision.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use switchboard_config::SwitchboardConfig;
use switchboard_core::{ProviderAdapter, SwitchboardError};

use crate::clarify;
use crate::decision::{PriorityLevel, RoutingDecision, UserContext};
use crate::entities;
use crate::llm::{LlmClassification, ModelClassifier};
use crate::registry::ModelRegistry;
use crate::rules::RuleClassifier;
use crate::selection::SelectionMatrix;
use crate::validate::Validator;

/// Classifies requests and routes them to downstream specialist models.
///
/// Holds no per-request state: one router instance serves any number of
/// concurrent classifications.
pub struct IntentRouter {
    llm: ModelClassifier,
    rules: RuleClassifier,
    matrix: SelectionMatrix,
    validator: Validator,
}

impl IntentRouter {
    /// Wire a router from configuration and an injected completion service.
    pub fn new(provider: Arc<dyn ProviderAdapter>, config: &SwitchboardConfig) -> Self {
        let registry = Arc::new(ModelRegistry::from_config(&config.models));
        let priority_cutoff = PriorityLevel::try_from(config.routing.priority_cutoff)
            .unwrap_or(PriorityLevel::High);
        let matrix = SelectionMatrix::new(
            config.models.selection.clone(),
            Arc::clone(&registry),
            priority_cutoff,
        );
        let rules = RuleClassifier::new(matrix.clone());
        let llm = ModelClassifier::new(
            provider,
            config.routing.classifier_model.clone(),
            config.routing.temperature,
            config.ollama.max_tokens,
            Duration::from_secs(config.routing.classify_timeout_secs),
        );
        let validator = Validator::new(registry, config.routing.confidence_threshold);

        Self {
            llm,
            rules,
            matrix,
            validator,
        }
    }

    /// Classify a request. Never fails: every error path degrades to a
    /// fallback decision rather than surfacing to the caller.
    pub async fn classify(&self, text: &str, context: Option<&UserContext>) -> RoutingDecision {
        let started = Instant::now();

        let mut decision = match self.classify_inner(text, context).await {
            Ok(decision) => decision,
            Err(e) => {
                error!(error = %e, "classification pipeline failed, using safe fallback");
                self.validator.safe_fallback()
            }
        };

        decision.processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            category = %decision.category,
            model = %decision.specialist_model,
            confidence = decision.confidence,
            elapsed_ms = decision.processing_time_ms,
            fallback = decision.fallback_used,
            "routing decision"
        );
        decision
    }

    async fn classify_inner(
        &self,
        text: &str,
        context: Option<&UserContext>,
    ) -> Result<RoutingDecision, SwitchboardError> {
        let decision = match self.llm.classify(text, context).await {
            Ok(parsed) => self.decision_from_model(parsed, text),
            Err(e) => {
                warn!(error = %e, "model-backed classification failed, using rule-based fallback");
                self.rules.classify(text)
            }
        };

        Ok(self.validator.validate(decision, text, &self.rules))
    }

    /// Turn a parsed model classification into a routing decision.
    ///
    /// Deterministic extraction always runs; model-reported entities only
    /// add what the patterns missed. The clarification invariant is enforced
    /// here: a clarifying decision always names at least one missing field
    /// and carries one to three questions.
    fn decision_from_model(&self, parsed: LlmClassification, text: &str) -> RoutingDecision {
        let mut entity_list = entities::extract(text);
        for entity in parsed.entities {
            let duplicate = entity_list.iter().any(|e| {
                e.entity_type == entity.entity_type && e.value.eq_ignore_ascii_case(&entity.value)
            });
            if !duplicate {
                entity_list.push(entity);
            }
        }

        let specialist_model = self.matrix.select(
            parsed.category,
            parsed.priority,
            parsed.complexity,
            &entity_list,
        );

        let (requires_clarification, missing_fields, suggested_questions) =
            if parsed.requires_clarification {
                let mut missing = parsed.missing_fields;
                if missing.is_empty() {
                    missing = clarify::check(parsed.category, text, &entity_list)
                        .map(|c| c.missing_fields)
                        .unwrap_or_default();
                }
                if missing.is_empty()
                    && let Some(first) = clarify::required_fields(parsed.category).first()
                {
                    missing.push((*first).to_string());
                }

                let mut questions = parsed.suggested_questions;
                if questions.is_empty() {
                    questions = clarify::questions_for(parsed.category, &missing);
                }
                questions.truncate(3);

                (true, missing, questions)
            } else {
                (false, Vec::new(), Vec::new())
            };

        RoutingDecision {
            category: parsed.category,
            priority: parsed.priority,
            complexity: parsed.complexity,
            specialist_model,
            confidence: parsed.confidence,
            requires_clarification,
            missing_fields,
            entities: entity_list,
            suggested_questions,
            processing_time_ms: 0.0,
            fallback_used: false,
        }
    }
}

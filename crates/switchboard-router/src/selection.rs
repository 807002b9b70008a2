// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-category model selection.
//!
//! Each intent category has its own policy for mapping (priority,
//! complexity, entities) to a concrete model identifier. Policies are
//! strategies behind a common trait, chosen by a single `match`, and read
//! their model ids from configuration so the matrix follows the capability
//! registry rather than hard-coding a lineup.
//!
//! Selection is pure and total: it never considers model load, only the
//! static category rules.

use std::sync::Arc;

use switchboard_config::model::SelectionConfig;

use crate::decision::{ComplexityLevel, Entity, IntentCategory, PriorityLevel};
use crate::registry::ModelRegistry;

/// Inputs a category policy may consult.
struct SelectionContext<'a> {
    priority: PriorityLevel,
    complexity: ComplexityLevel,
    entities: &'a [Entity],
    models: &'a SelectionConfig,
    registry: &'a ModelRegistry,
    /// Priorities at or below this value route to a category's strongest model.
    priority_cutoff: PriorityLevel,
}

impl SelectionContext<'_> {
    fn is_urgent(&self) -> bool {
        self.priority <= self.priority_cutoff
    }
}

/// A model-selection strategy for one intent category.
trait CategoryPolicy: Send + Sync {
    fn select(&self, cx: &SelectionContext<'_>) -> String;
}

/// Code: the priority gate dominates the complexity check.
struct CodePolicy;

impl CategoryPolicy for CodePolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        if cx.is_urgent() || cx.complexity >= ComplexityLevel::Complex {
            cx.models.code_strong.clone()
        } else if cx.complexity == ComplexityLevel::Medium {
            cx.models.code_balanced.clone()
        } else {
            cx.models.code_small.clone()
        }
    }
}

/// Vision: urgent requests get the largest model, OCR tasks the OCR-capable one.
struct VisionPolicy;

impl CategoryPolicy for VisionPolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        if cx.is_urgent() {
            cx.models.vision_large.clone()
        } else if cx
            .entities
            .iter()
            .any(|e| e.entity_type == "task" && e.value.to_lowercase().contains("ocr"))
        {
            cx.models.vision_ocr.clone()
        } else {
            cx.models.vision_default.clone()
        }
    }
}

/// Email: always the designated reliability model.
struct EmailPolicy;

impl CategoryPolicy for EmailPolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        cx.models.email.clone()
    }
}

/// Search: always the fixed mid-size model.
struct SearchPolicy;

impl CategoryPolicy for SearchPolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        cx.models.search.clone()
    }
}

/// Reminders are low-complexity by design; always the smallest general model.
struct ReminderPolicy;

impl CategoryPolicy for ReminderPolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        cx.models.reminder.clone()
    }
}

/// Analysis: very complex work gets the top model when the registry has it.
struct AnalysisPolicy;

impl CategoryPolicy for AnalysisPolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        if cx.complexity == ComplexityLevel::VeryComplex
            && cx.registry.is_known(&cx.models.analysis_top)
        {
            cx.models.analysis_top.clone()
        } else {
            cx.models.analysis_mid.clone()
        }
    }
}

/// General and unrecognized intents use the configured default model.
struct GeneralPolicy;

impl CategoryPolicy for GeneralPolicy {
    fn select(&self, cx: &SelectionContext<'_>) -> String {
        cx.registry.default_model().to_string()
    }
}

fn policy_for(category: IntentCategory) -> &'static dyn CategoryPolicy {
    match category {
        IntentCategory::Code => &CodePolicy,
        IntentCategory::Vision => &VisionPolicy,
        IntentCategory::Email => &EmailPolicy,
        IntentCategory::Search => &SearchPolicy,
        IntentCategory::Reminder => &ReminderPolicy,
        IntentCategory::Analysis => &AnalysisPolicy,
        IntentCategory::General | IntentCategory::Unknown => &GeneralPolicy,
    }
}

/// The model selection matrix: category-gated, configuration-driven.
#[derive(Debug, Clone)]
pub struct SelectionMatrix {
    models: SelectionConfig,
    registry: Arc<ModelRegistry>,
    priority_cutoff: PriorityLevel,
}

impl SelectionMatrix {
    pub fn new(
        models: SelectionConfig,
        registry: Arc<ModelRegistry>,
        priority_cutoff: PriorityLevel,
    ) -> Self {
        Self {
            models,
            registry,
            priority_cutoff,
        }
    }

    /// Select the model for a classified request. Pure and total.
    pub fn select(
        &self,
        category: IntentCategory,
        priority: PriorityLevel,
        complexity: ComplexityLevel,
        entities: &[Entity],
    ) -> String {
        let cx = SelectionContext {
            priority,
            complexity,
            entities,
            models: &self.models,
            registry: &self.registry,
            priority_cutoff: self.priority_cutoff,
        };
        policy_for(category).select(&cx)
    }
}

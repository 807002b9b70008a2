// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-backed intent classification.
//!
//! Asks a small classifier model for a structured-output JSON decision.
//! Any failure -- transport error, timeout, malformed JSON, an enum value
//! outside the closed sets -- surfaces as an error so the caller can fall
//! back to the rule-based path. A single failure is final: there is no
//! retry of a classification call.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use switchboard_core::types::{ProviderMessage, ProviderRequest, ResponseFormat};
use switchboard_core::{ProviderAdapter, SwitchboardError};

use crate::decision::{ComplexityLevel, Entity, IntentCategory, PriorityLevel, UserContext};

/// Confidence assumed when the model omits the field.
const DEFAULT_CONFIDENCE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You are an intent router. Classify the user's request and output \
ONLY a valid JSON object.\n\
Categories: code, vision, email, search, reminder, analysis, general, unknown\n\
Priority: integer 1-5 (1=urgent, 2=high, 3=normal, 4=low, 5=background)\n\
Complexity: simple, medium, complex, very_complex\n\
Fields: category, priority, complexity, confidence (0-1), requires_clarification, \
missing_fields, entities (list of {\"type\", \"value\", \"confidence\"}), suggested_questions";

/// Fixed few-shot examples prepended to every classification request.
const FEW_SHOT_EXAMPLES: &str = r#"Examples:

Input: "Write a Python function to reverse a linked list"
Output: {"category": "code", "priority": 3, "complexity": "medium", "confidence": 0.93, "requires_clarification": false, "missing_fields": [], "entities": [{"type": "language", "value": "python", "confidence": 0.95}], "suggested_questions": []}

Input: "Remind me"
Output: {"category": "reminder", "priority": 3, "complexity": "simple", "confidence": 0.88, "requires_clarification": true, "missing_fields": ["time", "message"], "entities": [], "suggested_questions": ["When would you like me to remind you?", "What should I remind you about?"]}

Input: "urgent: compare these two vendor contracts in detail"
Output: {"category": "analysis", "priority": 1, "complexity": "complex", "confidence": 0.9, "requires_clarification": false, "missing_fields": [], "entities": [], "suggested_questions": []}"#;

/// The JSON shape a classification call must return.
///
/// Enum-typed fields are strict: a category, priority, or complexity outside
/// the closed sets fails deserialization, which fails the whole call.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmClassification {
    pub category: IntentCategory,
    pub priority: PriorityLevel,
    pub complexity: ComplexityLevel,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    #[serde(default)]
    pub requires_clarification: bool,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

fn default_confidence() -> f32 {
    DEFAULT_CONFIDENCE
}

/// Issues structured-output classification calls to the completion service.
pub struct ModelClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl ModelClassifier {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        model: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            model,
            temperature,
            max_tokens,
            timeout,
        }
    }

    /// Classify `text`, optionally sharpened by a caller-supplied profile.
    ///
    /// The call is bounded by the configured timeout; on expiry it counts as
    /// a failure, never as a pending classification.
    pub async fn classify(
        &self,
        text: &str,
        context: Option<&UserContext>,
    ) -> Result<LlmClassification, SwitchboardError> {
        let request = ProviderRequest {
            model: self.model.clone(),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![ProviderMessage::user(build_user_prompt(text, context))],
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            response_format: Some(ResponseFormat::Json),
        };

        let response = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| SwitchboardError::Timeout {
                duration: self.timeout,
            })??;

        debug!(model = %response.model, "classification response received");
        parse_classification(&response.content)
    }
}

/// Render the user prompt: few-shot block, raw input, optional context.
fn build_user_prompt(text: &str, context: Option<&UserContext>) -> String {
    let mut prompt = format!("{FEW_SHOT_EXAMPLES}\n\nInput: \"{text}\"\n");

    if let Some(ctx) = context {
        prompt.push_str("\nUser context:\n");
        if let Some(ref lang) = ctx.preferred_language {
            prompt.push_str(&format!("- Preferred language: {lang}\n"));
        }
        if let Some(last) = ctx.last_category {
            prompt.push_str(&format!("- Previous category: {last}\n"));
        }
        if let Some(ref expertise) = ctx.expertise {
            prompt.push_str(&format!("- Expertise level: {expertise}\n"));
        }
    }

    prompt.push_str("\nOutput:");
    prompt
}

/// Parse a classification response into the structured shape.
///
/// Locates the JSON object leniently (models sometimes wrap output in
/// markdown fences or prose) and then deserializes strictly.
pub fn parse_classification(content: &str) -> Result<LlmClassification, SwitchboardError> {
    let json = extract_json_object(content).ok_or_else(|| {
        SwitchboardError::Classification("response contains no JSON object".to_string())
    })?;

    serde_json::from_str(json)
        .map_err(|e| SwitchboardError::Classification(format!("invalid classification: {e}")))
}

/// Slice out the first `{` .. last `}` span, if any.
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

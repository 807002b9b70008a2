// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the routing pipeline.
//!
//! Each test wires an `IntentRouter` against a `MockProvider` with scripted
//! replies, covering both classification paths, the escalation policy, and
//! the decision invariants.

use std::sync::Arc;
use std::time::Duration;

use switchboard_config::SwitchboardConfig;
use switchboard_router::{
    ComplexityLevel, IntentCategory, IntentRouter, PriorityLevel, RoutingDecision, UserContext,
};
use switchboard_test_utils::{MockProvider, MockReply};

fn router_with(replies: Vec<MockReply>) -> IntentRouter {
    router_with_config(replies, SwitchboardConfig::default())
}

fn router_with_config(replies: Vec<MockReply>, config: SwitchboardConfig) -> IntentRouter {
    let provider = Arc::new(MockProvider::with_replies(replies));
    IntentRouter::new(provider, &config)
}

/// A scripted classification the model-backed path will accept.
fn classification_json(category: &str, priority: u8, complexity: &str, confidence: f32) -> String {
    serde_json::json!({
        "category": category,
        "priority": priority,
        "complexity": complexity,
        "confidence": confidence,
        "requires_clarification": false,
        "missing_fields": [],
        "entities": [],
        "suggested_questions": []
    })
    .to_string()
}

fn failing_reply() -> MockReply {
    MockReply::Error("connection refused".to_string())
}

/// Strip the wall-clock field so decisions compare structurally.
fn without_timing(mut decision: RoutingDecision) -> RoutingDecision {
    decision.processing_time_ms = 0.0;
    decision
}

// ---- Model-backed path ----

#[tokio::test]
async fn accepted_model_classification_routes_without_fallback() {
    let router = router_with(vec![MockReply::Text(classification_json(
        "code", 3, "medium", 0.95,
    ))]);

    let decision = router
        .classify("Write a Python function to calculate fibonacci", None)
        .await;

    assert_eq!(decision.category, IntentCategory::Code);
    assert_eq!(decision.complexity, ComplexityLevel::Medium);
    assert!(!decision.fallback_used);
    assert!(!decision.requires_clarification);
    // Medium complexity at normal priority: the balanced code tier.
    assert_eq!(decision.specialist_model, "qwen2.5-coder:7b");
    // Deterministic extraction runs on the model-backed path too.
    assert!(
        decision
            .entities
            .iter()
            .any(|e| e.entity_type == "language" && e.value == "python")
    );
}

#[tokio::test]
async fn user_context_is_accepted_on_the_model_path() {
    let router = router_with(vec![MockReply::Text(classification_json(
        "code", 3, "simple", 0.9,
    ))]);
    let context = UserContext {
        preferred_language: Some("rust".to_string()),
        last_category: Some(IntentCategory::Code),
        expertise: Some("expert".to_string()),
    };

    let decision = router.classify("fix the borrow checker error", Some(&context)).await;
    assert_eq!(decision.category, IntentCategory::Code);
    assert!(!decision.fallback_used);
}

#[tokio::test]
async fn model_clarification_request_always_carries_fields_and_questions() {
    // The model asks for clarification but reports no missing fields; the
    // router must fill both lists to keep the decision invariant.
    let reply = serde_json::json!({
        "category": "reminder",
        "priority": 3,
        "complexity": "simple",
        "confidence": 0.9,
        "requires_clarification": true,
        "missing_fields": [],
        "entities": [],
        "suggested_questions": []
    })
    .to_string();
    let router = router_with(vec![MockReply::Text(reply)]);

    let decision = router.classify("Remind me tomorrow", None).await;
    assert!(decision.requires_clarification);
    assert!(!decision.missing_fields.is_empty());
    assert!((1..=3).contains(&decision.suggested_questions.len()));
}

// ---- Failure escalation ----

#[tokio::test]
async fn provider_failure_falls_back_to_rules() {
    let router = router_with(vec![failing_reply()]);

    let decision = router
        .classify("Write a Python function to calculate fibonacci", None)
        .await;

    assert!(decision.fallback_used);
    assert_eq!(decision.category, IntentCategory::Code);
    assert_eq!(decision.confidence, 0.6);
}

#[tokio::test]
async fn malformed_model_output_falls_back_to_rules() {
    let router = router_with(vec![MockReply::Text(
        "I think this is probably a code question?".to_string(),
    )]);

    let decision = router.classify("debug my python script now", None).await;
    assert!(decision.fallback_used);
    assert_eq!(decision.category, IntentCategory::Code);
}

#[tokio::test]
async fn enum_value_outside_closed_set_falls_back_to_rules() {
    let router = router_with(vec![MockReply::Text(classification_json(
        "poetry", 3, "medium", 0.99,
    ))]);

    let decision = router.classify("summarize this quarterly report please", None).await;
    assert!(decision.fallback_used);
    assert_eq!(decision.category, IntentCategory::Analysis);
}

#[tokio::test(start_paused = true)]
async fn completion_timeout_yields_rule_based_decision() {
    // The classify timeout is 5s; the backend takes 60s. The virtual clock
    // jumps straight to the timeout.
    let router = router_with(vec![MockReply::Delayed(
        Duration::from_secs(60),
        classification_json("code", 3, "medium", 0.95),
    )]);

    let decision = router.classify("debug my python script now", None).await;
    assert!(decision.fallback_used);
    assert_eq!(decision.category, IntentCategory::Code);
    assert_eq!(decision.confidence, 0.6);
}

#[tokio::test]
async fn low_confidence_model_result_is_discarded_for_rules() {
    let text = "Write a Python function to calculate fibonacci";
    let router = router_with(vec![MockReply::Text(classification_json(
        "email", 3, "medium", 0.4,
    ))]);

    let decision = router.classify(text, None).await;
    assert!(decision.fallback_used);

    // The substituted decision is exactly what the rule-based path produces.
    let rules_router = router_with(vec![failing_reply()]);
    let expected = rules_router.classify(text, None).await;
    assert_eq!(without_timing(decision), without_timing(expected));
}

#[tokio::test]
async fn unknown_selected_model_is_replaced_with_default() {
    let mut config = SwitchboardConfig::default();
    // Point the search slot at a model absent from the registry.
    config.models.selection.search = "ghost:1b".to_string();
    let router = router_with_config(
        vec![MockReply::Text(classification_json(
            "search", 3, "simple", 0.9,
        ))],
        config,
    );

    let decision = router.classify("search for rust job postings", None).await;
    assert_eq!(decision.specialist_model, "phi4:14b");
    assert!(decision.fallback_used);
}

// ---- Rule-based path ----

#[tokio::test]
async fn greetings_resolve_general_without_clarification() {
    for text in ["hello", "hi", "hey"] {
        let router = router_with(vec![failing_reply()]);
        let decision = router.classify(text, None).await;
        assert_eq!(decision.category, IntentCategory::General, "{text}");
        assert!(!decision.requires_clarification, "{text}");
        assert!(decision.confidence >= 0.9, "{text}");
        assert!(decision.fallback_used);
    }
}

#[tokio::test]
async fn bare_search_asks_what_to_search_for() {
    let router = router_with(vec![failing_reply()]);
    let decision = router.classify("Search", None).await;

    assert_eq!(decision.category, IntentCategory::Search);
    assert!(decision.requires_clarification);
    assert_eq!(decision.missing_fields, vec!["search query"]);
    assert_eq!(
        decision.suggested_questions,
        vec!["What would you like me to search for?"]
    );
}

#[tokio::test]
async fn vague_reminder_asks_for_time_and_message() {
    let router = router_with(vec![failing_reply()]);
    let decision = router.classify("Remind me tomorrow", None).await;

    assert_eq!(decision.category, IntentCategory::Reminder);
    assert!(decision.requires_clarification);
    assert_eq!(decision.missing_fields, vec!["time", "message"]);
    assert_eq!(decision.suggested_questions.len(), 2);
}

#[tokio::test]
async fn short_code_request_requires_clarification() {
    let router = router_with(vec![failing_reply()]);
    let decision = router.classify("fix code", None).await;
    assert_eq!(decision.category, IntentCategory::Code);
    assert!(decision.requires_clarification);
}

#[tokio::test]
async fn rule_based_classification_is_deterministic() {
    let text = "urgent: debug this python script before the deadline";
    let first = router_with(vec![failing_reply()]).classify(text, None).await;
    let second = router_with(vec![failing_reply()]).classify(text, None).await;
    assert_eq!(without_timing(first), without_timing(second));
}

// ---- Global invariants ----

#[tokio::test]
async fn every_decision_is_well_formed() {
    let inputs = [
        "",
        "hi",
        "Search",
        "Remind me tomorrow",
        "Write a Python function to calculate fibonacci",
        "analyze the performance of this distributed system under production load",
        "send an email to bob@example.com about the meeting at 3pm",
        "??!",
    ];

    for text in inputs {
        // Force varied paths: garbage model output on odd lengths, failure
        // on even, so both escalation branches see every kind of input.
        let reply = if text.len() % 2 == 0 {
            failing_reply()
        } else {
            MockReply::Text("not json at all".to_string())
        };
        let router = router_with(vec![reply]);
        let decision = router.classify(text, None).await;

        assert!(
            (0.0..=1.0).contains(&decision.confidence),
            "confidence out of range for {text:?}"
        );
        let known = SwitchboardConfig::default().models.known;
        assert!(
            known.contains(&decision.specialist_model),
            "unregistered model {} for {text:?}",
            decision.specialist_model
        );
        if decision.requires_clarification {
            assert!(!decision.missing_fields.is_empty(), "{text:?}");
            assert!(
                (1..=3).contains(&decision.suggested_questions.len()),
                "{text:?}"
            );
        }
        assert!(decision.processing_time_ms >= 0.0);
    }
}

#[tokio::test]
async fn urgent_simple_code_routes_to_strongest_model() {
    // Priority gate dominates complexity: urgent + simple still escalates.
    let router = router_with(vec![MockReply::Text(classification_json(
        "code", 1, "simple", 0.95,
    ))]);
    let decision = router.classify("hotfix the python deploy script now", None).await;
    assert_eq!(decision.priority, PriorityLevel::Urgent);
    assert_eq!(decision.specialist_model, "deepseek-coder-v2:16b");
}

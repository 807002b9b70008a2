// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and model routing for the Switchboard agent.
//!
//! This crate provides:
//! - [`IntentRouter`]: the infallible classification entry point
//! - [`RuleClassifier`]: deterministic keyword-based fallback classification
//! - [`ModelClassifier`]: structured-output classification via a completion
//!   service
//! - [`SelectionMatrix`]: per-category (priority, complexity, entities) ->
//!   model mapping
//! - [`Validator`]: confidence gating, registry enforcement, safe fallback
//!
//! The router intercepts user requests before dispatch, deciding which
//! downstream specialist model should handle each one -- or which follow-up
//! questions to ask when the request is under-specified.

pub mod clarify;
pub mod decision;
pub mod entities;
pub mod llm;
pub mod registry;
pub mod router;
pub mod rules;
pub mod selection;
pub mod validate;

pub use decision::{
    ComplexityLevel, Entity, IntentCategory, PriorityLevel, RoutingDecision, UserContext,
};
pub use llm::ModelClassifier;
pub use registry::ModelRegistry;
pub use router::IntentRouter;
pub use rules::RuleClassifier;
pub use selection::SelectionMatrix;
pub use validate::Validator;

// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the router and completion-service adapters.

use serde::{Deserialize, Serialize};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// A single chat message sent to a completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// Message role (`system`, `user`, `assistant`).
    pub role: String,
    /// Plain-text message content.
    pub content: String,
}

impl ProviderMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Structured output format requested from a completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// The response content must be a single JSON object.
    Json,
}

/// A request to a completion service.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Model identifier to invoke.
    pub model: String,
    /// Optional system prompt, prepended as a `system` message by adapters
    /// whose wire format has no dedicated system field.
    pub system_prompt: Option<String>,
    /// Conversation messages in order.
    pub messages: Vec<ProviderMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature. `None` uses the backend default.
    pub temperature: Option<f32>,
    /// Requested output format, if any.
    pub response_format: Option<ResponseFormat>,
}

/// Token accounting reported by a completion service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// A response from a completion service.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text content.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
    /// Token usage for the call.
    pub usage: TokenUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(ProviderMessage::system("a").role, "system");
        assert_eq!(ProviderMessage::user("b").role, "user");
        assert_eq!(ProviderMessage::user("b").content, "b");
    }

    #[test]
    fn response_format_serializes_lowercase() {
        let json = serde_json::to_string(&ResponseFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
    }
}

// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion-service adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without a live Ollama host. Besides
//! canned text, replies can inject provider errors and artificial delays
//! (for exercising classification timeouts).

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchboard_core::traits::adapter::PluginAdapter;
use switchboard_core::traits::provider::ProviderAdapter;
use switchboard_core::types::{HealthStatus, ProviderRequest, ProviderResponse, TokenUsage};
use switchboard_core::SwitchboardError;

/// One scripted reply for a mock completion call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text immediately.
    Text(String),
    /// Fail with a provider error carrying this message.
    Error(String),
    /// Sleep for the given duration, then return the text. Pair with a
    /// classify timeout shorter than the delay to simulate a hung backend.
    Delayed(Duration, String),
}

/// A mock completion service that pops replies from a FIFO queue.
///
/// When the queue is empty, a default "mock response" text is returned.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock provider pre-loaded with text replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let replies = responses.into_iter().map(MockReply::Text).collect();
        Self {
            replies: Arc::new(Mutex::new(replies)),
        }
    }

    /// Create a mock provider pre-loaded with scripted replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
        }
    }

    /// Append a text reply to the queue.
    pub async fn push_text(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(MockReply::Text(text.into()));
    }

    /// Append an error reply to the queue.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(MockReply::Error(message.into()));
    }

    /// Append a delayed text reply to the queue.
    pub async fn push_delayed(&self, delay: Duration, text: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(MockReply::Delayed(delay, text.into()));
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchboardError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SwitchboardError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, SwitchboardError> {
        let text = match self.next_reply().await {
            MockReply::Text(text) => text,
            MockReply::Error(message) => return Err(SwitchboardError::provider(message)),
            MockReply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                text
            }
        };

        Ok(ProviderResponse {
            content: text,
            model: request.model,
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "test-model".to_string(),
            system_prompt: None,
            messages: vec![],
            max_tokens: 100,
            temperature: None,
            response_format: None,
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.content, "mock response");
        assert_eq!(resp.model, "test-model");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider =
            MockProvider::with_responses(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(request()).await.unwrap().content, "second");
        // Queue exhausted, falls back to default.
        assert_eq!(
            provider.complete(request()).await.unwrap().content,
            "mock response"
        );
    }

    #[tokio::test]
    async fn error_reply_fails_the_call() {
        let provider = MockProvider::with_replies(vec![MockReply::Error("boom".to_string())]);
        let err = provider.complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn delayed_reply_sleeps_before_returning() {
        let provider = MockProvider::new();
        provider
            .push_delayed(Duration::from_millis(20), "late")
            .await;
        let started = std::time::Instant::now();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.content, "late");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let provider = MockProvider::new();
        assert_eq!(
            provider.health_check().await.unwrap(),
            HealthStatus::Healthy
        );
    }
}

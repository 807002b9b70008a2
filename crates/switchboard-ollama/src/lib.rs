// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama completion-service adapter for the Switchboard routing engine.
//!
//! This crate implements [`ProviderAdapter`] for a local or remote Ollama
//! host, with an optional TTL response cache in front of the network call
//! for deterministic (low-temperature, JSON-format) requests.

pub mod cache;
pub mod client;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use switchboard_config::SwitchboardConfig;
use switchboard_core::traits::{PluginAdapter, ProviderAdapter};
use switchboard_core::types::{
    HealthStatus, ProviderRequest, ProviderResponse, ResponseFormat, TokenUsage,
};
use switchboard_core::SwitchboardError;

use crate::cache::ResponseCache;
use crate::client::{ChatMessage, ChatOptions, ChatRequest, OllamaClient};

/// Calls at or below this temperature are deterministic enough to cache.
const LOW_TEMPERATURE_CUTOFF: f32 = 0.2;

/// Ollama completion provider implementing [`ProviderAdapter`].
pub struct OllamaProvider {
    client: OllamaClient,
    cache: Option<ResponseCache>,
}

impl OllamaProvider {
    /// Creates a new Ollama provider from the given configuration.
    pub fn new(config: &SwitchboardConfig) -> Result<Self, SwitchboardError> {
        let client = OllamaClient::new(
            &config.ollama.host,
            Duration::from_secs(config.ollama.timeout_secs),
            Duration::from_secs(config.ollama.connect_timeout_secs),
        )?;
        let cache = config
            .cache
            .enabled
            .then(|| ResponseCache::new(Duration::from_secs(config.cache.ttl_secs)));

        info!(
            host = %config.ollama.host,
            cache = config.cache.enabled,
            "Ollama provider initialized"
        );

        Ok(Self { client, cache })
    }

    /// Lists the models currently available on the Ollama host.
    pub async fn available_models(&self) -> Result<Vec<String>, SwitchboardError> {
        self.client.list_models().await
    }

    fn to_chat_request(&self, request: &ProviderRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        }));

        ChatRequest {
            model: request.model.clone(),
            messages,
            stream: false,
            format: request.response_format,
            options: ChatOptions {
                temperature: request.temperature,
                num_predict: Some(request.max_tokens),
            },
        }
    }
}

/// Whether a request qualifies for the response cache.
fn cacheable(request: &ProviderRequest) -> bool {
    request.response_format == Some(ResponseFormat::Json)
        && request
            .temperature
            .is_some_and(|t| t <= LOW_TEMPERATURE_CUTOFF)
}

/// Render the full prompt text for cache keying.
fn render_prompt(request: &ProviderRequest) -> String {
    let mut prompt = String::new();
    if let Some(ref system) = request.system_prompt {
        prompt.push_str("system: ");
        prompt.push_str(system);
        prompt.push('\n');
    }
    for message in &request.messages {
        prompt.push_str(&message.role);
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchboardError> {
        match self.client.list_models().await {
            Ok(models) if models.is_empty() => Ok(HealthStatus::Degraded(
                "Ollama host reachable but has no models".to_string(),
            )),
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), SwitchboardError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OllamaProvider {
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, SwitchboardError> {
        let cache_key = match (&self.cache, cacheable(&request)) {
            (Some(_), true) => Some(ResponseCache::key(
                &request.model,
                &render_prompt(&request),
            )),
            _ => None,
        };

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key)
            && let Some(content) = cache.get(key).await
        {
            debug!(model = %request.model, "response cache hit");
            return Ok(ProviderResponse {
                content,
                model: request.model,
                usage: TokenUsage::default(),
            });
        }

        let chat_request = self.to_chat_request(&request);
        let response = self.client.chat(&chat_request).await?;

        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.insert(key, response.message.content.clone()).await;
        }

        Ok(ProviderResponse {
            content: response.message.content,
            model: response.model,
            usage: TokenUsage {
                prompt_tokens: response.prompt_eval_count,
                completion_tokens: response.eval_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::types::ProviderMessage;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(host: &str, cache_enabled: bool) -> SwitchboardConfig {
        let mut config = SwitchboardConfig::default();
        config.ollama.host = host.to_string();
        config.cache.enabled = cache_enabled;
        config
    }

    fn json_request() -> ProviderRequest {
        ProviderRequest {
            model: "gemma3:1b".to_string(),
            system_prompt: Some("You are a router.".to_string()),
            messages: vec![ProviderMessage::user("classify: hello")],
            max_tokens: 512,
            temperature: Some(0.1),
            response_format: Some(ResponseFormat::Json),
        }
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "gemma3:1b",
            "message": {"role": "assistant", "content": content},
            "done": true,
            "prompt_eval_count": 12,
            "eval_count": 7
        })
    }

    #[tokio::test]
    async fn complete_maps_request_and_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{}")))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&test_config(&server.uri(), false)).unwrap();
        let response = provider.complete(json_request()).await.unwrap();
        assert_eq!(response.content, "{}");
        assert_eq!(response.model, "gemma3:1b");
        assert_eq!(response.usage.prompt_tokens, 12);
        assert_eq!(response.usage.completion_tokens, 7);
    }

    #[tokio::test]
    async fn cache_hit_short_circuits_the_network_call() {
        let server = MockServer::start().await;
        // A second network round-trip would violate the expect(1).
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{\"a\": 1}")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&test_config(&server.uri(), true)).unwrap();
        let first = provider.complete(json_request()).await.unwrap();
        let second = provider.complete(json_request()).await.unwrap();
        assert_eq!(first.content, second.content);
        // Cache hits consume no tokens.
        assert_eq!(second.usage, TokenUsage::default());
    }

    #[tokio::test]
    async fn high_temperature_calls_bypass_the_cache() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("text")))
            .expect(2)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&test_config(&server.uri(), true)).unwrap();
        let mut request = json_request();
        request.temperature = Some(0.7);
        request.response_format = None;

        provider.complete(request.clone()).await.unwrap();
        provider.complete(request).await.unwrap();
    }

    #[tokio::test]
    async fn health_check_reflects_tag_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "gemma3:1b"}]
            })))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&test_config(&server.uri(), false)).unwrap();
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_degrades_on_empty_host() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})),
            )
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&test_config(&server.uri(), false)).unwrap();
        assert!(matches!(
            provider.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_host_reports_unhealthy() {
        let provider =
            OllamaProvider::new(&test_config("http://127.0.0.1:1", false)).unwrap();
        assert!(matches!(
            provider.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }
}

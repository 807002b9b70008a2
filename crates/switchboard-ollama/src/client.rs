// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama API.
//!
//! Provides [`OllamaClient`] which handles request construction for the
//! `/api/chat` and `/api/tags` endpoints. Calls are single-shot: the routing
//! pipeline treats the first failure as final, so the client performs no
//! internal retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use switchboard_core::SwitchboardError;
use switchboard_core::types::ResponseFormat;
use tracing::debug;

/// A chat message in Ollama wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Sampling options accepted by the chat endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Streaming is always disabled; the router consumes whole responses.
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ResponseFormat>,
    pub options: ChatOptions,
}

/// Response body for `POST /api/chat` (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub prompt_eval_count: u64,
    #[serde(default)]
    pub eval_count: u64,
}

/// Response body for `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelTag {
    name: String,
}

/// HTTP client for Ollama API communication.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a new Ollama API client.
    ///
    /// # Arguments
    /// * `host` - Base URL of the Ollama host (e.g. `http://localhost:11434`)
    /// * `timeout` - Overall per-request timeout
    /// * `connect_timeout` - TCP connect timeout
    pub fn new(
        host: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, SwitchboardError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| SwitchboardError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: host.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a non-streaming chat request and returns the full response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, SwitchboardError> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SwitchboardError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "chat response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwitchboardError::provider(format!(
                "Ollama API returned {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| SwitchboardError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        serde_json::from_str(&body).map_err(|e| SwitchboardError::Provider {
            message: format!("failed to parse chat response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Lists the models available on the Ollama host.
    pub async fn list_models(&self) -> Result<Vec<String>, SwitchboardError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SwitchboardError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwitchboardError::provider(format!(
                "Ollama API returned {status}: {body}"
            )));
        }

        let tags: TagsResponse =
            response.json().await.map_err(|e| SwitchboardError::Provider {
                message: format!("failed to parse tags response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Switchboard routing engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Switchboard configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to the model
/// lineup of the reference deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchboardConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Ollama completion-service settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Classification and escalation settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Capability registry and per-category model selection.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "switchboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ollama completion-service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama host.
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Overall request timeout in seconds.
    #[serde(default = "default_ollama_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum tokens a completion may generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            timeout_secs: default_ollama_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    1024
}

/// Classification and escalation configuration.
///
/// The escalation threshold and the priority cutoff were tuned empirically
/// in the reference deployment; both materially change routing behavior, so
/// they live in configuration rather than in code.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Model used for the model-backed intent classification call.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Timeout for a single classification call, in seconds. On expiry the
    /// call counts as failed and the rule-based path takes over.
    #[serde(default = "default_classify_timeout_secs")]
    pub classify_timeout_secs: u64,

    /// Model-backed results below this confidence are discarded in favor of
    /// the rule-based classifier (0.0-1.0).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Priorities at or below this value (lower is more urgent) route to the
    /// strongest model a category offers.
    #[serde(default = "default_priority_cutoff")]
    pub priority_cutoff: u8,

    /// Sampling temperature for classification calls. Kept low so identical
    /// inputs classify identically.
    #[serde(default = "default_classify_temperature")]
    pub temperature: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            classifier_model: default_classifier_model(),
            classify_timeout_secs: default_classify_timeout_secs(),
            confidence_threshold: default_confidence_threshold(),
            priority_cutoff: default_priority_cutoff(),
            temperature: default_classify_temperature(),
        }
    }
}

fn default_classifier_model() -> String {
    "gemma3:1b".to_string()
}

fn default_classify_timeout_secs() -> u64 {
    5
}

fn default_confidence_threshold() -> f32 {
    0.6
}

fn default_priority_cutoff() -> u8 {
    2
}

fn default_classify_temperature() -> f32 {
    0.1
}

/// Capability registry and per-category model selection slots.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Fallback model used when no category-specific rule applies or a
    /// selected model is missing from the registry.
    #[serde(default = "default_default_model")]
    pub default: String,

    /// Models known to this deployment. A routing decision never names a
    /// model outside this list.
    #[serde(default = "default_known_models")]
    pub known: Vec<String>,

    /// Per-category selection slots.
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default: default_default_model(),
            known: default_known_models(),
            selection: SelectionConfig::default(),
        }
    }
}

fn default_default_model() -> String {
    "phi4:14b".to_string()
}

fn default_known_models() -> Vec<String> {
    [
        "gemma3:1b",
        "gemma3:4b",
        "gemma3:12b",
        "qwen2.5-coder:3b",
        "qwen2.5-coder:7b",
        "qwen2.5:14b",
        "phi4:14b",
        "llama3.2-vision:11b",
        "minicpm-v:8b",
        "deepseek-coder-v2:16b",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Per-category model selection slots consumed by the selection matrix.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    /// Strongest code model (urgent/high priority or complex tasks).
    #[serde(default = "default_code_strong")]
    pub code_strong: String,

    /// Mid-tier code model for medium complexity.
    #[serde(default = "default_code_balanced")]
    pub code_balanced: String,

    /// Smallest code model for simple tasks.
    #[serde(default = "default_code_small")]
    pub code_small: String,

    /// Largest vision model (urgent/high priority).
    #[serde(default = "default_vision_large")]
    pub vision_large: String,

    /// OCR-capable vision model.
    #[serde(default = "default_vision_ocr")]
    pub vision_ocr: String,

    /// Default vision model.
    #[serde(default = "default_vision_default")]
    pub vision_default: String,

    /// Reliability model for email tasks, regardless of priority.
    #[serde(default = "default_email_model")]
    pub email: String,

    /// Fixed mid-size model for search tasks.
    #[serde(default = "default_search_model")]
    pub search: String,

    /// Smallest general model for reminders.
    #[serde(default = "default_reminder_model")]
    pub reminder: String,

    /// Top analysis model for very complex analysis.
    #[serde(default = "default_analysis_top")]
    pub analysis_top: String,

    /// Mid-tier analysis model.
    #[serde(default = "default_analysis_mid")]
    pub analysis_mid: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            code_strong: default_code_strong(),
            code_balanced: default_code_balanced(),
            code_small: default_code_small(),
            vision_large: default_vision_large(),
            vision_ocr: default_vision_ocr(),
            vision_default: default_vision_default(),
            email: default_email_model(),
            search: default_search_model(),
            reminder: default_reminder_model(),
            analysis_top: default_analysis_top(),
            analysis_mid: default_analysis_mid(),
        }
    }
}

fn default_code_strong() -> String {
    "deepseek-coder-v2:16b".to_string()
}

fn default_code_balanced() -> String {
    "qwen2.5-coder:7b".to_string()
}

fn default_code_small() -> String {
    "qwen2.5-coder:3b".to_string()
}

fn default_vision_large() -> String {
    "llama3.2-vision:11b".to_string()
}

fn default_vision_ocr() -> String {
    "minicpm-v:8b".to_string()
}

fn default_vision_default() -> String {
    "gemma3:4b".to_string()
}

fn default_email_model() -> String {
    "phi4:14b".to_string()
}

fn default_search_model() -> String {
    "qwen2.5:14b".to_string()
}

fn default_reminder_model() -> String {
    "gemma3:4b".to_string()
}

fn default_analysis_top() -> String {
    "phi4:14b".to_string()
}

fn default_analysis_mid() -> String {
    "qwen2.5:14b".to_string()
}

/// Response cache configuration.
///
/// The cache sits in front of the completion service and only stores
/// responses to deterministic (low-temperature, JSON-format) calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Enable the response cache.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Seconds before a cached response expires.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    300
}

// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deployment capability registry.
//!
//! The registry is the closed set of models a routing decision may name.
//! It is built from configuration at startup and read-only afterwards, so
//! concurrent classifications share it without locking.

use std::collections::HashSet;

use switchboard_config::model::ModelsConfig;

/// The set of models known to this deployment plus the configured default.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    known: HashSet<String>,
    default_model: String,
}

impl ModelRegistry {
    /// Build a registry from the `[models]` configuration section.
    ///
    /// The default model is always a member, even if the `known` list
    /// omitted it.
    pub fn from_config(config: &ModelsConfig) -> Self {
        let mut known: HashSet<String> = config.known.iter().cloned().collect();
        known.insert(config.default.clone());
        Self {
            known,
            default_model: config.default.clone(),
        }
    }

    /// Whether `model` may appear in a routing decision.
    pub fn is_known(&self, model: &str) -> bool {
        self.known.contains(model)
    }

    /// The configured fallback model.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// All registered model identifiers, in arbitrary order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModelRegistry {
        ModelRegistry::from_config(&ModelsConfig::default())
    }

    #[test]
    fn default_lineup_is_registered() {
        let registry = registry();
        assert!(registry.is_known("phi4:14b"));
        assert!(registry.is_known("qwen2.5-coder:7b"));
        assert!(registry.is_known("deepseek-coder-v2:16b"));
        assert!(!registry.is_known("gpt-oss:120b"));
    }

    #[test]
    fn default_model_is_always_known() {
        let config = ModelsConfig {
            default: "special:1b".to_string(),
            known: vec!["other:2b".to_string()],
            ..ModelsConfig::default()
        };
        let registry = ModelRegistry::from_config(&config);
        assert!(registry.is_known("special:1b"));
        assert_eq!(registry.default_model(), "special:1b");
    }
}

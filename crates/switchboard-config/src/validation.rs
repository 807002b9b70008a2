// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges and registry consistency.

use crate::diagnostic::ConfigError;
use crate::model::SwitchboardConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SwitchboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.ollama.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ollama.host must not be empty".to_string(),
        });
    }

    if config.ollama.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "ollama.timeout_secs must be positive".to_string(),
        });
    }

    if config.routing.classify_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.classify_timeout_secs must be positive".to_string(),
        });
    }

    let threshold = config.routing.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.confidence_threshold must be within 0.0-1.0, got {threshold}"
            ),
        });
    }

    if !(1..=5).contains(&config.routing.priority_cutoff) {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.priority_cutoff must be within 1-5, got {}",
                config.routing.priority_cutoff
            ),
        });
    }

    if config.models.known.is_empty() {
        errors.push(ConfigError::Validation {
            message: "models.known must list at least one model".to_string(),
        });
    }

    // The default model is the substitution target for every unknown model;
    // it must itself be registered.
    if !config.models.known.contains(&config.models.default) {
        errors.push(ConfigError::Validation {
            message: format!(
                "models.default `{}` is not listed in models.known",
                config.models.default
            ),
        });
    }

    for (slot, model) in selection_slots(config) {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("models.selection.{slot} must not be empty"),
            });
        }
    }

    if config.cache.enabled && config.cache.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "cache.ttl_secs must be positive when the cache is enabled".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Enumerate the selection slots with their config key names.
fn selection_slots(config: &SwitchboardConfig) -> Vec<(&'static str, &str)> {
    let s = &config.models.selection;
    vec![
        ("code_strong", &s.code_strong),
        ("code_balanced", &s.code_balanced),
        ("code_small", &s.code_small),
        ("vision_large", &s.vision_large),
        ("vision_ocr", &s.vision_ocr),
        ("vision_default", &s.vision_default),
        ("email", &s.email),
        ("search", &s.search),
        ("reminder", &s.reminder),
        ("analysis_top", &s.analysis_top),
        ("analysis_mid", &s.analysis_mid),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SwitchboardConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let mut config = SwitchboardConfig::default();
        config.routing.confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("confidence_threshold"))
        );
    }

    #[test]
    fn unregistered_default_model_rejected() {
        let mut config = SwitchboardConfig::default();
        config.models.default = "mystery:1b".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("mystery:1b")));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = SwitchboardConfig::default();
        config.ollama.host = String::new();
        config.routing.priority_cutoff = 9;
        config.models.known.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "expected all errors collected, got {errors:?}");
    }

    #[test]
    fn zero_ttl_rejected_only_when_cache_enabled() {
        let mut config = SwitchboardConfig::default();
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_err());

        config.cache.enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}

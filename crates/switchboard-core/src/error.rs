// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchboard routing engine.

use thiserror::Error;

/// The primary error type used across Switchboard crates.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion-service errors (connection failure, HTTP error, bad payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A classification response could not be interpreted (malformed JSON,
    /// enum value outside the closed sets).
    #[error("classification error: {0}")]
    Classification(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SwitchboardError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_render() {
        let e = SwitchboardError::Config("bad threshold".into());
        assert_eq!(e.to_string(), "configuration error: bad threshold");

        let e = SwitchboardError::provider("connection refused");
        assert_eq!(e.to_string(), "provider error: connection refused");

        let e = SwitchboardError::Classification("unknown category `poetry`".into());
        assert!(e.to_string().contains("poetry"));

        let e = SwitchboardError::Timeout {
            duration: std::time::Duration::from_secs(5),
        };
        assert!(e.to_string().contains("5s"));
    }

    #[test]
    fn provider_error_carries_source() {
        let io = std::io::Error::other("socket closed");
        let e = SwitchboardError::Provider {
            message: "request failed".into(),
            source: Some(Box::new(io)),
        };
        assert!(std::error::Error::source(&e).is_some());
    }
}

// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchboard routing engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Switchboard workspace. Completion-service
//! adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchboardError;
pub use types::{HealthStatus, ProviderMessage, ProviderRequest, ProviderResponse, TokenUsage};

// Re-export adapter traits at crate root.
pub use traits::{PluginAdapter, ProviderAdapter};

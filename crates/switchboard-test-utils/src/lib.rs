// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchboard integration tests.

pub mod mock_provider;

pub use mock_provider::{MockProvider, MockReply};

// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vigil integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without a live analyst service.
//!
//! # Components
//!
//! - [`MockBackend`] - Mock query backend with scripted results
//! - [`MockAnalyst`] - Mock remote analyst with scripted answers
//! - [`TestHarness`] - Full pipeline over a seeded temp warehouse

pub mod harness;
pub mod mock_analyst;
pub mod mock_backend;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_analyst::MockAnalyst;
pub use mock_backend::MockBackend;

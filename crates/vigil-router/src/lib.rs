// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question routing for the Vigil response pipeline.
//!
//! This crate provides:
//! - [`ResponseClassifier`]: keyword routing of a question to a topic [`Route`](vigil_core::Route)
//! - [`FallbackQueryCatalog`]: the canonical aggregation query and chart hint per route
//! - [`example_questions`]: canned questions per topic context
//!
//! Everything here is pure and synchronous. No network, no backend calls.

pub mod catalog;
pub mod classifier;
pub mod examples;

pub use catalog::{FallbackQuery, FallbackQueryCatalog};
pub use classifier::ResponseClassifier;
pub use examples::example_questions;

// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vigil security analytics assistant.
//!
//! This crate provides the error type, the data model that flows through the
//! response pipeline, and the collaborator traits that data backends and
//! remote analysts implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VigilError;
pub use types::{
    AdapterType, AnalystRequest, ChartHint, ContentBlock, ErrorReason, HealthStatus, Question,
    Record, Response, ResponseError, Route, Table, TopicContext, Value,
};

pub use traits::{PluginAdapter, QueryBackend, RemoteAnalyst};

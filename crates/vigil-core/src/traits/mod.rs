// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! All collaborators extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod analyst;
pub mod backend;

pub use adapter::PluginAdapter;
pub use analyst::RemoteAnalyst;
pub use backend::QueryBackend;

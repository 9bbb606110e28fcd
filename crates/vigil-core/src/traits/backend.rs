// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query backend trait: the only I/O boundary for data retrieval.

use async_trait::async_trait;

use crate::error::VigilError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Table;

/// Executes query text against a tabular data source.
///
/// Query text is opaque to callers. Implementations may enforce their own
/// deadlines and may cache results, but must return the same rows with or
/// without a cache.
#[async_trait]
pub trait QueryBackend: PluginAdapter {
    /// Runs `query` and returns its rows in backend column order.
    async fn execute(&self, query: &str) -> Result<Table, VigilError>;
}

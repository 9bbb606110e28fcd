// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock query backend for deterministic testing.
//!
//! `MockBackend` implements `QueryBackend` with scripted results and records
//! every query it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vigil_core::{AdapterType, HealthStatus, PluginAdapter, QueryBackend, Table, Value, VigilError};

enum Fallthrough {
    Rows(Table),
    Fail(String),
}

/// A mock backend that returns pre-configured results.
///
/// Results are popped from a FIFO queue. When the queue is empty the
/// backend's fallthrough applies: a fixed table, or a fixed error.
pub struct MockBackend {
    queued: Arc<Mutex<VecDeque<Result<Table, VigilError>>>>,
    queries: Arc<Mutex<Vec<String>>>,
    fallthrough: Fallthrough,
}

impl MockBackend {
    /// A backend answering every query with a one-row `category`/`count` table.
    pub fn new() -> Self {
        let table = Table::with_rows(
            ["category", "count"],
            vec![vec![Value::Text("mock".into()), Value::Integer(1)]],
        );
        Self::returning(table.unwrap_or_else(|_| Table::new(["category", "count"])))
    }

    /// A backend answering every query with `table`.
    pub fn returning(table: Table) -> Self {
        Self {
            queued: Arc::new(Mutex::new(VecDeque::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            fallthrough: Fallthrough::Rows(table),
        }
    }

    /// A backend failing every query with a backend error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            queued: Arc::new(Mutex::new(VecDeque::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            fallthrough: Fallthrough::Fail(message.into()),
        }
    }

    /// Queue a result ahead of the fallthrough.
    pub async fn push_result(&self, result: Result<Table, VigilError>) {
        self.queued.lock().await.push_back(result);
    }

    /// Every query executed so far, in order.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::QueryBackend
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        Ok(())
    }
}

#[async_trait]
impl QueryBackend for MockBackend {
    async fn execute(&self, query: &str) -> Result<Table, VigilError> {
        self.queries.lock().await.push(query.to_string());
        if let Some(result) = self.queued.lock().await.pop_front() {
            return result;
        }
        match &self.fallthrough {
            Fallthrough::Rows(table) => Ok(table.clone()),
            Fallthrough::Fail(message) => Err(VigilError::backend(message.clone())),
        }
    }
}

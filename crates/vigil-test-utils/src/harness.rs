// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete pipeline over a temp SQLite warehouse
//! holding the demo data, with an optional mock analyst in front of it.

use std::sync::Arc;
use std::time::Duration;

use vigil_agent::{ResponsePipeline, Session};
use vigil_config::model::{FallbackConfig, VigilConfig, WarehouseConfig};
use vigil_core::{ContentBlock, QueryBackend, Question, Response, TopicContext, VigilError};
use vigil_router::FallbackQueryCatalog;
use vigil_storage::{CachedBackend, Database, SqliteBackend};

use crate::mock_analyst::MockAnalyst;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    analyst_answers: Option<Vec<Result<Vec<ContentBlock>, VigilError>>>,
    seed_demo_data: bool,
    row_limit: u32,
    cache_ttl_secs: u64,
    semantic_model: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            analyst_answers: None,
            seed_demo_data: true,
            row_limit: FallbackConfig::default().row_limit,
            cache_ttl_secs: 0,
            semantic_model: None,
        }
    }

    /// Put a mock analyst in front of the warehouse, replaying `answers`.
    pub fn with_analyst_answers(
        mut self,
        answers: Vec<Result<Vec<ContentBlock>, VigilError>>,
    ) -> Self {
        self.analyst_answers = Some(answers);
        self
    }

    /// Leave the warehouse empty (schema only).
    pub fn without_demo_data(mut self) -> Self {
        self.seed_demo_data = false;
        self
    }

    pub fn with_row_limit(mut self, row_limit: u32) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Wrap the warehouse in a query cache with the given lifetime.
    pub fn with_cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn with_semantic_model(mut self, model: impl Into<String>) -> Self {
        self.semantic_model = Some(model.into());
        self
    }

    /// Build the test harness, creating the warehouse and pipeline.
    pub async fn build(self) -> Result<TestHarness, VigilError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| VigilError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("warehouse.db");

        let config = VigilConfig {
            warehouse: WarehouseConfig {
                database_path: db_path.to_string_lossy().into_owned(),
                cache_ttl_secs: self.cache_ttl_secs,
                seed_demo_data: self.seed_demo_data,
            },
            fallback: FallbackConfig {
                row_limit: self.row_limit,
            },
            ..VigilConfig::default()
        };

        let sqlite = SqliteBackend::open(&config.warehouse).await?;
        let database = sqlite.database().clone();
        let backend: Arc<dyn QueryBackend + Send + Sync> = if self.cache_ttl_secs > 0 {
            Arc::new(CachedBackend::new(
                sqlite,
                Duration::from_secs(self.cache_ttl_secs),
            ))
        } else {
            Arc::new(sqlite)
        };

        let mut pipeline = ResponsePipeline::new(
            backend.clone(),
            FallbackQueryCatalog::new(config.fallback.row_limit),
        );
        let analyst = self
            .analyst_answers
            .map(|answers| Arc::new(MockAnalyst::with_answers(answers)));
        if let Some(analyst) = &analyst {
            pipeline = pipeline.with_analyst(analyst.clone());
        }
        if let Some(model) = self.semantic_model {
            pipeline = pipeline.with_semantic_model(model);
        }

        Ok(TestHarness {
            pipeline: Arc::new(pipeline),
            backend,
            database,
            analyst,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a temp warehouse and optional mock analyst.
pub struct TestHarness {
    /// The assembled pipeline.
    pub pipeline: Arc<ResponsePipeline>,
    /// The backend the pipeline queries (cached when a TTL was set).
    pub backend: Arc<dyn QueryBackend + Send + Sync>,
    /// Raw warehouse handle for direct assertions.
    pub database: Database,
    /// The mock analyst, when one was configured.
    pub analyst: Option<Arc<MockAnalyst>>,
    /// Configuration the harness was built from.
    pub config: VigilConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Resolve a context-free question.
    pub async fn ask(&self, text: &str) -> Response {
        self.pipeline.resolve(&Question::new(text)).await
    }

    /// Resolve a question under `context`.
    pub async fn ask_in(&self, text: &str, context: TopicContext) -> Response {
        self.pipeline
            .resolve(&Question::new(text).with_context(context))
            .await
    }

    /// A fresh session sharing this harness's pipeline.
    pub fn session(&self) -> Session {
        Session::new(self.pipeline.clone())
    }
}

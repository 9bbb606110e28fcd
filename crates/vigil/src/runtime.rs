// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator assembly shared by the `ask` and `shell` commands.
//!
//! The runtime owns collaborator lifecycle: it opens the warehouse, builds
//! the optional analyst, injects both into the pipeline, and shuts them
//! down when the command finishes.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use vigil_agent::ResponsePipeline;
use vigil_analyst::HttpAnalyst;
use vigil_config::model::VigilConfig;
use vigil_core::{PluginAdapter, QueryBackend, VigilError};
use vigil_router::FallbackQueryCatalog;
use vigil_storage::{CachedBackend, SqliteBackend};

/// Assembled collaborators plus the pipeline wired over them.
pub struct Runtime {
    pub pipeline: Arc<ResponsePipeline>,
    backend: Arc<dyn QueryBackend + Send + Sync>,
    analyst: Option<Arc<HttpAnalyst>>,
}

impl Runtime {
    pub async fn start(config: &VigilConfig) -> Result<Self, VigilError> {
        let sqlite = SqliteBackend::open(&config.warehouse).await?;
        let backend: Arc<dyn QueryBackend + Send + Sync> = if config.warehouse.cache_ttl_secs > 0 {
            Arc::new(CachedBackend::new(
                sqlite,
                Duration::from_secs(config.warehouse.cache_ttl_secs),
            ))
        } else {
            Arc::new(sqlite)
        };

        let mut pipeline = ResponsePipeline::new(
            backend.clone(),
            FallbackQueryCatalog::new(config.fallback.row_limit),
        );

        let analyst = HttpAnalyst::from_config(&config.analyst)?.map(Arc::new);
        if let Some(analyst) = &analyst {
            pipeline = pipeline.with_analyst(analyst.clone());
        }
        if let Some(model) = config
            .analyst
            .semantic_model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
        {
            pipeline = pipeline.with_semantic_model(model);
        }

        info!(
            warehouse = %config.warehouse.database_path,
            analyst = pipeline.has_analyst(),
            row_limit = pipeline.catalog().row_limit(),
            cache_ttl_secs = config.warehouse.cache_ttl_secs,
            "runtime ready"
        );

        Ok(Self {
            pipeline: Arc::new(pipeline),
            backend,
            analyst,
        })
    }

    /// Shut collaborators down. Failures are logged, not returned.
    pub async fn shutdown(self) {
        if let Some(analyst) = &self.analyst {
            if let Err(e) = analyst.shutdown().await {
                warn!(error = %e, "analyst shutdown failed");
            }
        }
        if let Err(e) = self.backend.shutdown().await {
            warn!(error = %e, "warehouse shutdown failed");
        }
    }
}

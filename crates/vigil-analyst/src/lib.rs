// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP remote analyst adapter for Vigil.
//!
//! This crate implements [`RemoteAnalyst`] for an analyst message API that
//! turns a natural-language question into text, suggested follow-ups, and
//! generated SQL.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use vigil_config::model::AnalystConfig;
use vigil_core::{
    AdapterType, AnalystRequest, ContentBlock, HealthStatus, PluginAdapter, RemoteAnalyst,
    TopicContext, VigilError,
};

use crate::client::AnalystClient;
use crate::types::{ApiMessage, MessageRequest, RequestContentBlock, ResponseContentBlock};

/// Remote analyst reached over HTTP, implementing [`RemoteAnalyst`].
pub struct HttpAnalyst {
    client: AnalystClient,
    has_token: bool,
}

impl HttpAnalyst {
    /// Builds an analyst from configuration.
    ///
    /// Returns `Ok(None)` when the analyst is disabled or has no endpoint, so
    /// callers can run without one.
    pub fn from_config(config: &AnalystConfig) -> Result<Option<Self>, VigilError> {
        if !config.enabled {
            debug!("remote analyst disabled");
            return Ok(None);
        }
        let Some(endpoint) = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        else {
            warn!("remote analyst enabled without an endpoint, running without it");
            return Ok(None);
        };

        let client = AnalystClient::new(
            endpoint.to_string(),
            config.token.as_deref(),
            config.token_type.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(endpoint, timeout_secs = config.timeout_secs, "remote analyst initialized");

        Ok(Some(Self::with_client(
            client,
            config.token.as_deref().is_some_and(|t| !t.is_empty()),
        )))
    }

    /// Creates an analyst around an existing client.
    pub fn with_client(client: AnalystClient, has_token: bool) -> Self {
        Self { client, has_token }
    }

    /// Converts an [`AnalystRequest`] to the wire [`MessageRequest`].
    ///
    /// A context other than general is prefixed to the question so the
    /// analyst sees what the caller is focused on.
    fn to_message_request(request: &AnalystRequest) -> MessageRequest {
        let text = match request.context {
            Some(ctx) if ctx != TopicContext::General => {
                format!("[context: {ctx}] {}", request.question)
            }
            _ => request.question.clone(),
        };

        MessageRequest {
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: vec![RequestContentBlock::Text { text }],
            }],
            semantic_model_file: request.semantic_model.clone(),
        }
    }
}

/// Converts wire content to core [`ContentBlock`]s, skipping unknown block types.
fn convert_content(content: Vec<serde_json::Value>) -> Vec<ContentBlock> {
    content
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<ResponseContentBlock>(raw.clone()) {
            Ok(ResponseContentBlock::Text { text }) => Some(ContentBlock::Text { text }),
            Ok(ResponseContentBlock::Sql {
                statement,
                confidence,
            }) => {
                if let Some(confidence) = confidence {
                    debug!(%confidence, "sql block confidence");
                }
                Some(ContentBlock::Sql { statement })
            }
            Ok(ResponseContentBlock::Suggestions { suggestions }) => {
                Some(ContentBlock::Suggestions { suggestions })
            }
            Err(e) => {
                let block_type = raw.get("type").and_then(|t| t.as_str()).unwrap_or("<none>");
                debug!(block_type, error = %e, "skipping unrecognized content block");
                None
            }
        })
        .collect()
}

#[async_trait]
impl PluginAdapter for HttpAnalyst {
    fn name(&self) -> &str {
        "http-analyst"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::RemoteAnalyst
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        // No probe request: asking a question is the only call the API offers.
        if self.has_token {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "no analyst token configured; requests are unauthenticated".to_string(),
            ))
        }
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        debug!("remote analyst shutting down");
        Ok(())
    }
}

#[async_trait]
impl RemoteAnalyst for HttpAnalyst {
    async fn ask(&self, request: AnalystRequest) -> Result<Vec<ContentBlock>, VigilError> {
        let wire = Self::to_message_request(&request);
        let response = self.client.send_message(&wire).await?;

        for warning in &response.warnings {
            warn!(
                request_id = response.request_id.as_deref().unwrap_or(""),
                warning = %warning.message,
                "analyst returned a warning"
            );
        }

        let blocks = convert_content(response.message.content);
        debug!(
            request_id = response.request_id.as_deref().unwrap_or(""),
            role = %response.message.role,
            blocks = blocks.len(),
            "analyst answered"
        );
        Ok(blocks)
    }
}

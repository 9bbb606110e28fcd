// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the analyst message API.
//!
//! Provides [`AnalystClient`] which handles request construction and
//! authentication. Every call is a single attempt: failures are returned to
//! the caller, which falls back to local queries instead of retrying.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;
use vigil_core::VigilError;

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Header carrying the authorization token type, when one is configured.
pub const TOKEN_TYPE_HEADER: &str = "x-authorization-token-type";

/// HTTP client for analyst communication.
#[derive(Debug, Clone)]
pub struct AnalystClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl AnalystClient {
    /// Creates a new analyst client.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL messages are POSTed to
    /// * `token` - Optional bearer token
    /// * `token_type` - Optional value for [`TOKEN_TYPE_HEADER`]
    /// * `timeout` - Whole-request deadline
    pub fn new(
        endpoint: String,
        token: Option<&str>,
        token_type: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, VigilError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                VigilError::Config(format!("invalid analyst token header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(token_type) = token_type.filter(|t| !t.is_empty()) {
            headers.insert(
                TOKEN_TYPE_HEADER,
                HeaderValue::from_str(token_type).map_err(|e| {
                    VigilError::Config(format!("invalid analyst token type header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VigilError::Analyst {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one message request and returns the parsed response.
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, VigilError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VigilError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    VigilError::Analyst {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, "analyst response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => match api_err.code {
                    Some(code) => format!("analyst error {status} ({code}): {}", api_err.message),
                    None => format!("analyst error {status}: {}", api_err.message),
                },
                Err(_) => format!("analyst returned {status}: {body}"),
            };
            return Err(VigilError::analyst(message));
        }

        let body = response.text().await.map_err(|e| VigilError::Analyst {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| VigilError::Analyst {
            message: format!("failed to parse analyst response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

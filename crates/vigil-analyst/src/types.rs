// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analyst message API request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// Body of a single analyst message request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub messages: Vec<ApiMessage>,
    /// Semantic model reference, omitted when the session has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_model_file: Option<String>,
}

/// One conversation turn sent to the analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: Vec<RequestContentBlock>,
}

/// Content the client sends. Only text is ever sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestContentBlock {
    Text { text: String },
}

// --- Response types ---

/// Successful analyst response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: ResponseMessage,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub warnings: Vec<ApiWarning>,
}

/// The analyst's reply turn.
///
/// Blocks stay as raw JSON here so one unrecognized block type does not
/// fail the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Vec<serde_json::Value>,
}

/// A content block the client knows how to interpret.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Sql {
        #[serde(default)]
        statement: String,
        #[serde(default)]
        confidence: Option<serde_json::Value>,
    },
    Suggestions {
        #[serde(default)]
        suggestions: Vec<String>,
    },
}

/// Non-fatal notice attached to a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiWarning {
    #[serde(default)]
    pub message: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

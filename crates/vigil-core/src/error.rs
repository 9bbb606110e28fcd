// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vigil workspace.

use thiserror::Error;

/// The primary error type used across all Vigil collaborator traits and core operations.
///
/// These are internal errors. What the end user sees is a
/// [`ResponseError`](crate::types::ResponseError) produced by the response pipeline.
#[derive(Debug, Error)]
pub enum VigilError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local storage errors (database open, migrations, connection closed).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A query failed to execute against the data backend.
    #[error("query failed: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote analyst could not be reached or answered with a non-success status.
    #[error("analyst unavailable: {message}")]
    Analyst {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote analyst answered with content that cannot be interpreted.
    #[error("malformed analyst content: {0}")]
    MalformedContent(String),

    /// A table was built with rows that do not match its columns.
    #[error("row has {found} values but table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    /// A collaborator gave up waiting for its remote service.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VigilError {
    /// Shorthand for a backend failure without an underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        VigilError::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for an analyst failure without an underlying source.
    pub fn analyst(message: impl Into<String>) -> Self {
        VigilError::Analyst {
            message: message.into(),
            source: None,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote analyst trait for natural-language question answering services.

use async_trait::async_trait;

use crate::error::VigilError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AnalystRequest, ContentBlock};

/// A service that answers a question with typed content blocks.
#[async_trait]
pub trait RemoteAnalyst: PluginAdapter {
    /// Sends one question and returns the answer's content blocks in order.
    ///
    /// Network failures and non-success statuses are reported as
    /// [`VigilError::Analyst`].
    async fn ask(&self, request: AnalystRequest) -> Result<Vec<ContentBlock>, VigilError>;
}

// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock remote analyst for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vigil_core::{
    AdapterType, AnalystRequest, ContentBlock, HealthStatus, PluginAdapter, RemoteAnalyst,
    VigilError,
};

/// A mock analyst that replays scripted answers.
///
/// Answers are popped from a FIFO queue. When the queue is empty the analyst
/// behaves as unreachable.
pub struct MockAnalyst {
    answers: Arc<Mutex<VecDeque<Result<Vec<ContentBlock>, VigilError>>>>,
    requests: Arc<Mutex<Vec<AnalystRequest>>>,
}

impl MockAnalyst {
    /// An analyst with no scripted answers; every call fails.
    pub fn new() -> Self {
        Self::with_answers(Vec::new())
    }

    /// An analyst pre-loaded with the given answers.
    pub fn with_answers(answers: Vec<Result<Vec<ContentBlock>, VigilError>>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::from(answers))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add an answer to the end of the queue.
    pub async fn push_answer(&self, answer: Result<Vec<ContentBlock>, VigilError>) {
        self.answers.lock().await.push_back(answer);
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<AnalystRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockAnalyst {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockAnalyst {
    fn name(&self) -> &str {
        "mock-analyst"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::RemoteAnalyst
    }

    async fn health_check(&self) -> Result<HealthStatus, VigilError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VigilError> {
        Ok(())
    }
}

#[async_trait]
impl RemoteAnalyst for MockAnalyst {
    async fn ask(&self, request: AnalystRequest) -> Result<Vec<ContentBlock>, VigilError> {
        self.requests.lock().await.push(request);
        self.answers
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(VigilError::analyst("connection refused")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> AnalystRequest {
        AnalystRequest {
            question: text.to_string(),
            context: None,
            semantic_model: None,
        }
    }

    #[tokio::test]
    async fn empty_queue_is_unreachable() {
        let analyst = MockAnalyst::new();
        let err = analyst.ask(request("hi")).await.unwrap_err();
        assert!(matches!(err, VigilError::Analyst { .. }));
        assert_eq!(analyst.call_count().await, 1);
    }

    #[tokio::test]
    async fn answers_replay_in_order() {
        let analyst = MockAnalyst::new();
        analyst
            .push_answer(Ok(vec![ContentBlock::Text { text: "one".into() }]))
            .await;
        analyst.push_answer(Ok(vec![])).await;

        assert_eq!(analyst.ask(request("a")).await.unwrap().len(), 1);
        assert!(analyst.ask(request("b")).await.unwrap().is_empty());
        let seen: Vec<String> = analyst
            .requests()
            .await
            .into_iter()
            .map(|r| r.question)
            .collect();
        assert_eq!(seen, vec!["a", "b"]);
    }
}

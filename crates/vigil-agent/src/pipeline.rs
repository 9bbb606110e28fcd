// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The question-to-response fallback chain.
//!
//! Resolution is ordered and short-circuiting:
//! 1. The remote analyst, when configured. Any failure here is absorbed.
//! 2. The route's canonical fallback query against the query backend.
//!
//! Only backend failures and unroutable questions reach the caller as a
//! [`ResponseError`](vigil_core::ResponseError). Every path ends in a
//! renderable [`Response`].

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use vigil_core::{
    AnalystRequest, ChartHint, ContentBlock, ErrorReason, QueryBackend, Question, RemoteAnalyst,
    Response, Route, Table, TopicContext, VigilError,
};
use vigil_router::{FallbackQueryCatalog, ResponseClassifier, example_questions};

use crate::visualizer::Visualizer;

/// Why the analyst step did not produce the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No analyst was wired into the pipeline.
    NotConfigured,
    /// Network failure or non-success status.
    RemoteUnavailable(String),
    /// Content that could not be turned into a response.
    MalformedRemoteContent(String),
    /// The analyst answered with nothing usable.
    EmptyContent,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotConfigured => write!(f, "analyst not configured"),
            FallbackReason::RemoteUnavailable(cause) => write!(f, "analyst unavailable: {cause}"),
            FallbackReason::MalformedRemoteContent(cause) => {
                write!(f, "malformed analyst content: {cause}")
            }
            FallbackReason::EmptyContent => write!(f, "analyst returned no content"),
        }
    }
}

impl From<VigilError> for FallbackReason {
    fn from(err: VigilError) -> Self {
        match err {
            VigilError::MalformedContent(cause) => FallbackReason::MalformedRemoteContent(cause),
            other => FallbackReason::RemoteUnavailable(other.to_string()),
        }
    }
}

/// Which step of the chain produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    Analyst,
    Fallback { route: Route, reason: FallbackReason },
}

/// A response plus the side-channel data the caller may surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub response: Response,
    /// Follow-up prompts offered by the analyst. Never part of the rows.
    pub suggestions: Vec<String>,
    pub source: ResolutionSource,
}

/// Orchestrates analyst, catalog, and backend into one [`Response`].
///
/// Collaborators are injected at construction; their lifecycle belongs to
/// the caller. The pipeline makes at most one analyst call and at most one
/// backend call per question and never retries.
pub struct ResponsePipeline {
    backend: Arc<dyn QueryBackend + Send + Sync>,
    analyst: Option<Arc<dyn RemoteAnalyst + Send + Sync>>,
    classifier: ResponseClassifier,
    catalog: FallbackQueryCatalog,
    semantic_model: Option<String>,
}

impl ResponsePipeline {
    /// A pipeline that answers from the fallback catalog only.
    pub fn new(backend: Arc<dyn QueryBackend + Send + Sync>, catalog: FallbackQueryCatalog) -> Self {
        Self {
            backend,
            analyst: None,
            classifier: ResponseClassifier::new(),
            catalog,
            semantic_model: None,
        }
    }

    /// Try `analyst` before the fallback catalog.
    pub fn with_analyst(mut self, analyst: Arc<dyn RemoteAnalyst + Send + Sync>) -> Self {
        self.analyst = Some(analyst);
        self
    }

    /// Semantic model reference forwarded with every analyst request.
    pub fn with_semantic_model(mut self, model: impl Into<String>) -> Self {
        self.semantic_model = Some(model.into());
        self
    }

    pub fn has_analyst(&self) -> bool {
        self.analyst.is_some()
    }

    pub fn catalog(&self) -> &FallbackQueryCatalog {
        &self.catalog
    }

    /// Resolve `question` to a response.
    pub async fn resolve(&self, question: &Question) -> Response {
        self.resolve_detailed(question).await.response
    }

    /// Resolve `question`, also reporting suggestions and which step answered.
    pub async fn resolve_detailed(&self, question: &Question) -> Resolution {
        let started = Instant::now();

        let reason = match &self.analyst {
            None => FallbackReason::NotConfigured,
            Some(analyst) => match self.ask_analyst(analyst.as_ref(), question).await {
                Ok((response, suggestions)) => {
                    info!(
                        source = "analyst",
                        chart_hint = %response.chart_hint(),
                        rows = response.rows().map_or(0, Table::row_count),
                        suggestions = suggestions.len(),
                        latency_ms = started.elapsed().as_millis() as u64,
                        "question resolved"
                    );
                    return Resolution {
                        response,
                        suggestions,
                        source: ResolutionSource::Analyst,
                    };
                }
                Err(reason) => {
                    warn!(%reason, "analyst step failed, using fallback query");
                    reason
                }
            },
        };

        let route = self.route_for(question);
        let response = self.run_fallback(route, question.context()).await;
        info!(
            source = "fallback",
            %route,
            succeeded = response.succeeded(),
            chart_hint = %response.chart_hint(),
            rows = response.rows().map_or(0, Table::row_count),
            latency_ms = started.elapsed().as_millis() as u64,
            "question resolved"
        );
        Resolution {
            response,
            suggestions: Vec::new(),
            source: ResolutionSource::Fallback { route, reason },
        }
    }

    /// Keyword route first; a caller-selected context only breaks a `general` tie.
    fn route_for(&self, question: &Question) -> Route {
        match self.classifier.classify(question.text()) {
            Route::General => question
                .context()
                .and_then(TopicContext::route)
                .unwrap_or(Route::General),
            route => route,
        }
    }

    async fn ask_analyst(
        &self,
        analyst: &(dyn RemoteAnalyst + Send + Sync),
        question: &Question,
    ) -> Result<(Response, Vec<String>), FallbackReason> {
        let request = AnalystRequest {
            question: question.text().to_string(),
            context: question.context(),
            semantic_model: self.semantic_model.clone(),
        };
        let blocks = analyst.ask(request).await?;

        let mut texts = Vec::new();
        let mut suggestions = Vec::new();
        let mut statement: Option<String> = None;
        for block in blocks {
            match block {
                ContentBlock::Text { text } if !text.trim().is_empty() => texts.push(text),
                ContentBlock::Text { .. } => {}
                ContentBlock::Suggestions { suggestions: s } => suggestions.extend(s),
                ContentBlock::Sql { statement: sql } => {
                    if sql.trim().is_empty() {
                        return Err(VigilError::MalformedContent(
                            "sql block with empty statement".into(),
                        )
                        .into());
                    }
                    if statement.is_some() {
                        debug!("ignoring additional sql block from analyst");
                    } else {
                        statement = Some(sql);
                    }
                }
            }
        }
        let explanation = texts.join("\n\n");

        let Some(sql) = statement else {
            if explanation.is_empty() && suggestions.is_empty() {
                return Err(FallbackReason::EmptyContent);
            }
            let empty = Table::new(Vec::<String>::new());
            return Ok((
                Response::success(empty, "", explanation, ChartHint::Table),
                suggestions,
            ));
        };

        let rows = self
            .backend
            .execute(&sql)
            .await
            .map_err(|e| VigilError::MalformedContent(format!("generated query failed: {e}")))?;
        let hint = Visualizer::suggest_hint(&rows);
        Ok((Response::success(rows, sql, explanation, hint), suggestions))
    }

    async fn run_fallback(&self, route: Route, context: Option<TopicContext>) -> Response {
        let Some(fallback) = self.catalog.query_for(route) else {
            debug!(%route, "no fallback query for route");
            return Response::failure(ErrorReason::NoFallbackForRoute, self.guidance(context));
        };

        match self.backend.execute(&fallback.query).await {
            Ok(rows) => Response::success(
                rows,
                fallback.query,
                fallback.explanation,
                fallback.chart_hint,
            ),
            Err(e) => {
                warn!(%route, error = %e, "fallback query failed");
                Response::failure(ErrorReason::BackendError, e.to_string())
                    .with_generated_query(fallback.query)
            }
        }
    }

    /// Help text listing the topics that have canned answers.
    fn guidance(&self, context: Option<TopicContext>) -> String {
        let topics: Vec<String> = self
            .catalog
            .supported_routes()
            .map(|r| r.to_string())
            .collect();
        let mut text = format!(
            "I couldn't match that question to a security topic. I can answer questions about {}.",
            topics.join(", ")
        );

        let examples: Vec<&str> = match context.filter(|c| c.route().is_some()) {
            Some(c) => example_questions(Some(c)).to_vec(),
            None => TopicContext::ALL
                .iter()
                .filter(|c| c.route().is_some())
                .filter_map(|c| example_questions(Some(*c)).first().copied())
                .collect(),
        };
        text.push_str(" Try asking:");
        for example in examples {
            text.push_str("\n  - ");
            text.push_str(example);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{Value, VigilError};
    use vigil_test_utils::{MockAnalyst, MockBackend};

    fn counts() -> Table {
        Table::with_rows(
            ["severity", "incident_count"],
            vec![
                vec!["critical".into(), 3.into()],
                vec!["high".into(), 3.into()],
            ],
        )
        .unwrap()
    }

    fn pipeline(backend: &Arc<MockBackend>) -> ResponsePipeline {
        ResponsePipeline::new(backend.clone(), FallbackQueryCatalog::new(10))
    }

    #[tokio::test]
    async fn fallback_uses_catalog_query_and_hint() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let resolution = pipeline(&backend)
            .resolve_detailed(&Question::new("Show me critical incidents"))
            .await;

        let expected = FallbackQueryCatalog::new(10)
            .query_for(Route::Incidents)
            .unwrap();
        let response = &resolution.response;
        assert!(response.succeeded());
        assert_eq!(response.chart_hint(), ChartHint::Bar);
        assert_eq!(response.generated_query(), expected.query);
        assert_eq!(response.explanation(), expected.explanation);
        assert_eq!(response.rows(), Some(&counts()));
        assert_eq!(
            resolution.source,
            ResolutionSource::Fallback {
                route: Route::Incidents,
                reason: FallbackReason::NotConfigured
            }
        );
        assert_eq!(backend.queries().await, vec![expected.query]);
    }

    #[tokio::test]
    async fn general_question_without_analyst_has_no_fallback() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let response = pipeline(&backend).resolve(&Question::new("hello")).await;

        let error = response.error().unwrap();
        assert_eq!(error.reason, ErrorReason::NoFallbackForRoute);
        assert!(error.message.contains("incidents"));
        assert!(error.message.contains("vulnerabilities"));
        assert!(response.rows().is_none());
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn context_routes_a_general_question() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let question = Question::new("what should I look at?").with_context(TopicContext::Users);
        let response = pipeline(&backend).resolve(&question).await;
        assert!(response.succeeded());
        assert_eq!(response.chart_hint(), ChartHint::Pie);
    }

    #[tokio::test]
    async fn keywords_win_over_context() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let question = Question::new("any new malware?").with_context(TopicContext::Users);
        let response = pipeline(&backend).resolve(&question).await;
        assert_eq!(response.chart_hint(), ChartHint::Heatmap);
    }

    #[tokio::test]
    async fn trends_context_guidance_lists_general_examples() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let question = Question::new("how are we doing").with_context(TopicContext::Trends);
        let response = pipeline(&backend).resolve(&question).await;
        let message = &response.error().unwrap().message;
        assert!(message.contains(example_questions(Some(TopicContext::Incidents))[0]));
    }

    #[tokio::test]
    async fn backend_failure_is_user_visible() {
        let backend = Arc::new(MockBackend::failing("no such table: security_incidents"));
        let response = pipeline(&backend)
            .resolve(&Question::new("list open incidents"))
            .await;

        let error = response.error().unwrap();
        assert_eq!(error.reason, ErrorReason::BackendError);
        assert!(error.message.contains("no such table"));
        assert!(!response.generated_query().is_empty());
    }

    #[tokio::test]
    async fn analyst_sql_is_executed_and_hinted_from_shape() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let analyst = Arc::new(MockAnalyst::with_answers(vec![Ok(vec![
            ContentBlock::Text {
                text: "Open incidents by severity.".into(),
            },
            ContentBlock::Sql {
                statement: "SELECT severity, COUNT(*) FROM security_incidents GROUP BY 1".into(),
            },
            ContentBlock::Suggestions {
                suggestions: vec!["Which systems are affected?".into()],
            },
        ])]));
        let pipeline = pipeline(&backend)
            .with_analyst(analyst.clone())
            .with_semantic_model("@models/security.yaml");

        let resolution = pipeline
            .resolve_detailed(&Question::new("hello").with_context(TopicContext::Incidents))
            .await;

        assert_eq!(resolution.source, ResolutionSource::Analyst);
        assert_eq!(resolution.suggestions, vec!["Which systems are affected?"]);
        let response = resolution.response;
        assert!(response.succeeded());
        assert_eq!(response.explanation(), "Open incidents by severity.");
        assert!(response.generated_query().starts_with("SELECT severity"));
        assert_eq!(response.chart_hint(), ChartHint::Bar);

        let requests = analyst.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].question, "hello");
        assert_eq!(requests[0].context, Some(TopicContext::Incidents));
        assert_eq!(
            requests[0].semantic_model.as_deref(),
            Some("@models/security.yaml")
        );
        assert_eq!(backend.call_count().await, 1);
    }

    #[tokio::test]
    async fn analyst_text_only_answer_is_a_success_without_rows() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let analyst = Arc::new(MockAnalyst::with_answers(vec![Ok(vec![
            ContentBlock::Text {
                text: "Your posture looks stable.".into(),
            },
            ContentBlock::Text {
                text: "No critical items are open.".into(),
            },
        ])]));
        let response = pipeline(&backend)
            .with_analyst(analyst)
            .resolve(&Question::new("hello"))
            .await;

        assert!(response.succeeded());
        assert!(response.rows().unwrap().is_empty());
        assert_eq!(response.chart_hint(), ChartHint::Table);
        assert_eq!(
            response.explanation(),
            "Your posture looks stable.\n\nNo critical items are open."
        );
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn analyst_failures_fall_back_silently() {
        fn kind(reason: &FallbackReason) -> &'static str {
            match reason {
                FallbackReason::NotConfigured => "not_configured",
                FallbackReason::RemoteUnavailable(_) => "unavailable",
                FallbackReason::MalformedRemoteContent(_) => "malformed",
                FallbackReason::EmptyContent => "empty",
            }
        }

        let cases = vec![
            (Err(VigilError::analyst("connection refused")), "unavailable"),
            (Ok(vec![]), "empty"),
            (Ok(vec![ContentBlock::Text { text: "  ".into() }]), "empty"),
            (
                Ok(vec![ContentBlock::Sql {
                    statement: " ".into(),
                }]),
                "malformed",
            ),
        ];

        for (answer, expected) in cases {
            let backend = Arc::new(MockBackend::returning(counts()));
            let analyst = Arc::new(MockAnalyst::with_answers(vec![answer]));
            let resolution = pipeline(&backend)
                .with_analyst(analyst.clone())
                .resolve_detailed(&Question::new("Which users have unusual login patterns?"))
                .await;

            assert!(resolution.response.succeeded());
            assert_eq!(resolution.response.chart_hint(), ChartHint::Pie);
            match &resolution.source {
                ResolutionSource::Fallback { route, reason } => {
                    assert_eq!(*route, Route::Users);
                    assert_eq!(kind(reason), expected, "unexpected reason: {reason}");
                }
                other => panic!("expected fallback, got {other:?}"),
            }
            assert_eq!(analyst.call_count().await, 1);
        }
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn absorbed_analyst_failure_is_logged() {
        let backend = Arc::new(MockBackend::returning(counts()));
        let analyst = Arc::new(MockAnalyst::new());
        let response = pipeline(&backend)
            .with_analyst(analyst)
            .resolve(&Question::new("incident breakdown"))
            .await;

        assert!(response.succeeded());
        assert!(logs_contain("analyst step failed"));
        assert!(logs_contain("connection refused"));
    }

    #[tokio::test]
    async fn failing_generated_query_falls_back_to_catalog() {
        let backend = Arc::new(MockBackend::returning(counts()));
        backend
            .push_result(Err(VigilError::backend("no such column: severty")))
            .await;
        let analyst = Arc::new(MockAnalyst::with_answers(vec![Ok(vec![ContentBlock::Sql {
            statement: "SELECT severty FROM security_incidents".into(),
        }])]));

        let resolution = pipeline(&backend)
            .with_analyst(analyst)
            .resolve_detailed(&Question::new("incident breakdown"))
            .await;

        assert!(resolution.response.succeeded());
        assert_eq!(resolution.response.rows().unwrap().rows()[0][1], Value::Integer(3));
        assert!(matches!(
            resolution.source,
            ResolutionSource::Fallback {
                reason: FallbackReason::MalformedRemoteContent(_),
                ..
            }
        ));
        // One call for the generated query, one for the fallback.
        assert_eq!(backend.call_count().await, 2);
    }

    #[test]
    fn analyst_errors_map_to_fallback_reasons() {
        assert_eq!(
            FallbackReason::from(VigilError::MalformedContent("bad block".into())),
            FallbackReason::MalformedRemoteContent("bad block".into())
        );
        assert_eq!(
            FallbackReason::from(VigilError::Timeout {
                duration: std::time::Duration::from_secs(5),
            }),
            FallbackReason::RemoteUnavailable("operation timed out after 5s".into())
        );
        assert!(matches!(
            FallbackReason::from(VigilError::analyst("503")),
            FallbackReason::RemoteUnavailable(cause) if cause.contains("503")
        ));
    }

    #[test]
    fn fallback_reason_display() {
        assert_eq!(
            FallbackReason::NotConfigured.to_string(),
            "analyst not configured"
        );
        assert_eq!(
            FallbackReason::RemoteUnavailable("503".into()).to_string(),
            "analyst unavailable: 503"
        );
    }
}

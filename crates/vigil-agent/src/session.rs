// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One user's interactive session: a shared pipeline plus a private log.
//!
//! A session is never shared between users. `submit` takes `&mut self`, so
//! at most one question per session is in flight.

use std::sync::Arc;

use tracing::debug;
use vigil_core::{Question, TopicContext};

use crate::conversation::{ConversationEntry, ConversationLog};
use crate::pipeline::{ResolutionSource, ResponsePipeline};

/// The outcome of one submitted question.
#[derive(Debug)]
pub struct Turn<'a> {
    /// The exchange as recorded in the session log.
    pub entry: &'a ConversationEntry,
    pub suggestions: Vec<String>,
    pub source: ResolutionSource,
}

pub struct Session {
    pipeline: Arc<ResponsePipeline>,
    log: ConversationLog,
    context: Option<TopicContext>,
}

impl Session {
    pub fn new(pipeline: Arc<ResponsePipeline>) -> Self {
        Self {
            pipeline,
            log: ConversationLog::new(),
            context: None,
        }
    }

    /// Start the session with a default topic context.
    pub fn with_context(mut self, context: TopicContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Change the context applied to questions asked from now on.
    pub fn set_context(&mut self, context: Option<TopicContext>) {
        debug!(?context, "session context changed");
        self.context = context;
    }

    pub fn context(&self) -> Option<TopicContext> {
        self.context
    }

    /// Ask `text` under the session's current context.
    pub async fn ask(&mut self, text: &str) -> Turn<'_> {
        let question = match self.context {
            Some(context) => Question::new(text).with_context(context),
            None => Question::new(text),
        };
        self.submit(question).await
    }

    /// Resolve `question` and record the exchange.
    pub async fn submit(&mut self, question: Question) -> Turn<'_> {
        let resolution = self.pipeline.resolve_detailed(&question).await;
        let entry = self.log.append(question, resolution.response);
        debug!(sequence = entry.sequence(), "exchange recorded");
        Turn {
            entry,
            suggestions: resolution.suggestions,
            source: resolution.source,
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}

// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only question/response history for one session.
//!
//! The log is unbounded; a long session keeps every exchange until the
//! session is dropped.

use serde::Serialize;
use vigil_core::{Question, Response};

/// One recorded exchange. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationEntry {
    sequence: u64,
    question: Question,
    response: Response,
}

impl ConversationEntry {
    /// Position in the session, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}

/// Ordered history of exchanges, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exchange and return it with its assigned sequence number.
    pub fn append(&mut self, question: Question, response: Response) -> &ConversationEntry {
        let sequence = self.entries.last().map_or(1, |e| e.sequence + 1);
        self.entries.push(ConversationEntry {
            sequence,
            question,
            response,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Every entry in submission order.
    pub fn all(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

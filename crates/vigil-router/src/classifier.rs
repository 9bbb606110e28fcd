// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword routing of natural-language questions.
//!
//! Each route owns a fixed keyword set. Sets are tested in priority order and
//! the first one with a case-insensitive substring hit wins. There is no
//! scoring across routes: "critical incidents and malware" goes to incidents
//! because incidents is checked before threats.

use tracing::debug;
use vigil_core::Route;

/// Incident keywords (contains, case-insensitive).
const INCIDENT_KEYWORDS: &[&str] = &["incident", "alert", "breach"];

/// User behavior keywords (contains, case-insensitive).
const USER_KEYWORDS: &[&str] = &["user", "login", "authentication"];

/// Threat intelligence keywords (contains, case-insensitive).
const THREAT_KEYWORDS: &[&str] = &["threat", "malware", "attack"];

/// Vulnerability keywords (contains, case-insensitive).
const VULNERABILITY_KEYWORDS: &[&str] = &["vuln", "cve", "patch"];

/// Routes in the order they are tested.
const PRIORITY: &[(Route, &[&str])] = &[
    (Route::Incidents, INCIDENT_KEYWORDS),
    (Route::Users, USER_KEYWORDS),
    (Route::Threats, THREAT_KEYWORDS),
    (Route::Vulnerabilities, VULNERABILITY_KEYWORDS),
];

/// First-match-wins keyword classifier. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseClassifier;

impl ResponseClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a question into a [`Route`], falling back to [`Route::General`].
    pub fn classify(&self, question: &str) -> Route {
        let lower = question.to_lowercase();

        let route = PRIORITY
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(route, _)| *route)
            .unwrap_or(Route::General);

        debug!(route = %route, "question classified");
        route
    }
}

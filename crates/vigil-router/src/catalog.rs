// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical aggregation queries used when the remote analyst cannot answer.
//!
//! One entry per route. [`Route::General`] has none: callers
//! report "no fallback available" instead of running a query.

use vigil_core::{ChartHint, Route};

/// Placeholder replaced with the configured row limit.
const LIMIT_PLACEHOLDER: &str = "{limit}";

struct CatalogEntry {
    route: Route,
    template: &'static str,
    chart_hint: ChartHint,
    explanation: &'static str,
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        route: Route::Incidents,
        template: "SELECT severity, COUNT(*) AS incident_count \
                   FROM security_incidents \
                   WHERE status != 'resolved' \
                   GROUP BY severity \
                   ORDER BY incident_count DESC \
                   LIMIT {limit}",
        chart_hint: ChartHint::Bar,
        explanation: "Open security incidents grouped by severity.",
    },
    CatalogEntry {
        route: Route::Users,
        template: "SELECT risk_level, COUNT(*) AS user_count \
                   FROM user_risk_scores \
                   GROUP BY risk_level \
                   ORDER BY user_count DESC \
                   LIMIT {limit}",
        chart_hint: ChartHint::Pie,
        explanation: "Users grouped by behavioral risk level.",
    },
    CatalogEntry {
        route: Route::Threats,
        template: "SELECT threat_type, source_country, COUNT(*) AS indicator_count \
                   FROM threat_intel \
                   GROUP BY threat_type, source_country \
                   ORDER BY indicator_count DESC \
                   LIMIT {limit}",
        chart_hint: ChartHint::Heatmap,
        explanation: "Threat intelligence indicators by threat type and source country.",
    },
    CatalogEntry {
        route: Route::Vulnerabilities,
        template: "SELECT cve_id, cvss_score, priority_score \
                   FROM vulnerability_priorities \
                   ORDER BY priority_score DESC \
                   LIMIT {limit}",
        chart_hint: ChartHint::Bar,
        explanation: "Highest-priority vulnerabilities to patch, ranked by priority score.",
    },
];

/// A resolved fallback query, ready to hand to a query backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackQuery {
    pub query: String,
    pub chart_hint: ChartHint,
    /// Static description shown as the response explanation.
    pub explanation: &'static str,
}

/// Static route-to-query mapping with the row limit baked in at construction.
#[derive(Debug, Clone)]
pub struct FallbackQueryCatalog {
    row_limit: u32,
}

impl FallbackQueryCatalog {
    /// Create a catalog whose templates are limited to `row_limit` rows.
    pub fn new(row_limit: u32) -> Self {
        Self {
            row_limit: row_limit.max(1),
        }
    }

    pub fn row_limit(&self) -> u32 {
        self.row_limit
    }

    /// The canonical query for `route`, or `None` when the route has no fallback.
    pub fn query_for(&self, route: Route) -> Option<FallbackQuery> {
        ENTRIES.iter().find(|e| e.route == route).map(|e| FallbackQuery {
            query: e
                .template
                .replace(LIMIT_PLACEHOLDER, &self.row_limit.to_string()),
            chart_hint: e.chart_hint,
            explanation: e.explanation,
        })
    }

    /// Routes that have a canonical query, in catalog order.
    pub fn supported_routes(&self) -> impl Iterator<Item = Route> + '_ {
        ENTRIES.iter().map(|e| e.route)
    }
}

impl Default for FallbackQueryCatalog {
    fn default() -> Self {
        Self::new(10)
    }
}

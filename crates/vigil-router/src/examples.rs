// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned example questions per topic context.

use vigil_core::TopicContext;

const GENERAL: &[&str] = &[
    "What's our overall security posture?",
    "Show me today's security summary",
    "What needs immediate attention?",
    "How are we performing against security KPIs?",
];

const INCIDENTS: &[&str] = &[
    "How many critical incidents this week?",
    "What are the most common incident types?",
    "Show incident resolution trends",
    "Which systems have the most security events?",
];

const USERS: &[&str] = &[
    "Which users have highest risk scores?",
    "Show login patterns by department",
    "Who has unusual authentication behavior?",
    "What are the top user security risks?",
];

const VULNERABILITIES: &[&str] = &[
    "What vulnerabilities should we patch first?",
    "Show CVSS distribution of open vulnerabilities",
    "Which assets have the most critical CVEs?",
    "How is our patching performance trending?",
];

const THREATS: &[&str] = &[
    "What threat types are we seeing most?",
    "Show threat intelligence by confidence level",
    "Which countries pose the highest threats?",
    "What are the emerging threat patterns?",
];

const TRENDS: &[&str] = &[
    "How are security metrics trending?",
    "Show monthly incident patterns",
    "What's our authentication success rate trend?",
    "How is vulnerability management improving?",
];

/// Example questions for `context`. No context means general.
pub fn example_questions(context: Option<TopicContext>) -> &'static [&'static str] {
    match context.unwrap_or(TopicContext::General) {
        TopicContext::General => GENERAL,
        TopicContext::Incidents => INCIDENTS,
        TopicContext::Users => USERS,
        TopicContext::Vulnerabilities => VULNERABILITIES,
        TopicContext::Threats => THREATS,
        TopicContext::Trends => TRENDS,
    }
}

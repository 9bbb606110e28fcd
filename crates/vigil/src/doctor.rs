// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vigil doctor` command implementation.
//!
//! Runs health checks against the configured warehouse and analyst so a
//! user can tell which step of the fallback chain will answer.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use colored::Colorize;
use vigil_analyst::HttpAnalyst;
use vigil_config::model::VigilConfig;
use vigil_core::{HealthStatus, PluginAdapter, VigilError};
use vigil_router::FallbackQueryCatalog;
use vigil_storage::SqliteBackend;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn from_health(name: &str, health: Result<HealthStatus, VigilError>, start: Instant) -> Self {
        match health {
            Ok(HealthStatus::Healthy) => Self::new(name, CheckStatus::Pass, "healthy", start),
            Ok(HealthStatus::Degraded(reason)) => Self::new(name, CheckStatus::Warn, reason, start),
            Ok(HealthStatus::Unhealthy(reason)) => Self::new(name, CheckStatus::Fail, reason, start),
            Err(e) => Self::new(name, CheckStatus::Fail, e.to_string(), start),
        }
    }
}

/// Run the `vigil doctor` command. Returns whether every check passed without failure.
pub async fn run_doctor(config: &VigilConfig, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = run_checks(config).await;

    println!();
    println!("  {} doctor", config.app.name);
    println!("  {}", "-".repeat(50));

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let (symbol, message) = match (&result.status, use_color) {
            (CheckStatus::Pass, true) => ("✓".green().to_string(), result.message.clone()),
            (CheckStatus::Warn, true) => ("!".yellow().to_string(), result.message.yellow().to_string()),
            (CheckStatus::Fail, true) => ("✗".red().to_string(), result.message.red().to_string()),
            (CheckStatus::Pass, false) => ("[OK]  ".to_string(), result.message.clone()),
            (CheckStatus::Warn, false) => ("[WARN]".to_string(), result.message.clone()),
            (CheckStatus::Fail, false) => ("[FAIL]".to_string(), result.message.clone()),
        };
        println!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name);
    }
    println!();

    let failures = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warnings = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    if failures + warnings == 0 {
        println!("  All checks passed.");
    } else {
        let issues = failures + warnings;
        let word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {word} found.");
    }
    println!();

    failures == 0
}

/// Every check, in display order.
pub async fn run_checks(config: &VigilConfig) -> Vec<CheckResult> {
    vec![
        check_warehouse(config).await,
        check_analyst(config).await,
        check_catalog(config),
    ]
}

async fn check_warehouse(config: &VigilConfig) -> CheckResult {
    let start = Instant::now();
    let backend = match SqliteBackend::open(&config.warehouse).await {
        Ok(backend) => backend,
        Err(e) => {
            return CheckResult::new("Warehouse", CheckStatus::Fail, format!("open failed: {e}"), start);
        }
    };
    let result = CheckResult::from_health("Warehouse", backend.health_check().await, start);
    let _ = backend.shutdown().await;
    result
}

async fn check_analyst(config: &VigilConfig) -> CheckResult {
    let start = Instant::now();
    match HttpAnalyst::from_config(&config.analyst) {
        Ok(None) => CheckResult::new(
            "Remote analyst",
            CheckStatus::Warn,
            "not configured, answering from fallback queries only",
            start,
        ),
        Ok(Some(analyst)) => {
            CheckResult::from_health("Remote analyst", analyst.health_check().await, start)
        }
        Err(e) => CheckResult::new("Remote analyst", CheckStatus::Fail, e.to_string(), start),
    }
}

fn check_catalog(config: &VigilConfig) -> CheckResult {
    let start = Instant::now();
    let catalog = FallbackQueryCatalog::new(config.fallback.row_limit);
    let routes: Vec<String> = catalog.supported_routes().map(|r| r.to_string()).collect();
    CheckResult::new(
        "Fallback queries",
        CheckStatus::Pass,
        format!(
            "{} routes ({}), limit {}",
            routes.len(),
            routes.join(", "),
            catalog.row_limit()
        ),
        start,
    )
}

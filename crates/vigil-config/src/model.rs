// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Vigil.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Vigil configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VigilConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Remote analyst service settings.
    #[serde(default)]
    pub analyst: AnalystConfig,

    /// Local warehouse (query backend) settings.
    #[serde(default)]
    pub warehouse: WarehouseConfig,

    /// Fallback query catalog settings.
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in the shell prompt and logs.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "vigil".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote analyst configuration.
///
/// When disabled or missing an endpoint, every question goes straight to the
/// local fallback queries.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalystConfig {
    /// Enable the remote analyst.
    #[serde(default)]
    pub enabled: bool,

    /// Full URL of the analyst message endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token, usually supplied through `VIGIL_ANALYST_TOKEN`.
    #[serde(default)]
    pub token: Option<String>,

    /// Value for the token-type header some analyst deployments require.
    #[serde(default)]
    pub token_type: Option<String>,

    /// Semantic model reference sent with every question in a session.
    #[serde(default)]
    pub semantic_model: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_analyst_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            token: None,
            token_type: None,
            semantic_model: None,
            timeout_secs: default_analyst_timeout_secs(),
        }
    }
}

fn default_analyst_timeout_secs() -> u64 {
    30
}

/// Local warehouse configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WarehouseConfig {
    /// Path to the SQLite database holding the security views.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Query result cache lifetime in seconds. 0 disables caching.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Load demo incidents, users, threats, and vulnerabilities on first open.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vigil").join("warehouse.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("warehouse.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_seed_demo_data() -> bool {
    true
}

/// Fallback query catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Row limit substituted into catalog query templates.
    #[serde(default = "default_row_limit")]
    pub row_limit: u32,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            row_limit: default_row_limit(),
        }
    }
}

fn default_row_limit() -> u32 {
    10
}

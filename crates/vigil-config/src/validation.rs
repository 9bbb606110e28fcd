// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, non-empty paths, and positive limits.

use crate::diagnostic::ConfigError;
use crate::model::VigilConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VigilConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    match config.analyst.endpoint.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => {
            if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "analyst.endpoint `{endpoint}` must be an http:// or https:// URL"
                    ),
                });
            }
        }
        _ if config.analyst.enabled => {
            errors.push(ConfigError::Validation {
                message: "analyst.enabled is true but analyst.endpoint is not set".to_string(),
            });
        }
        _ => {}
    }

    if config.analyst.timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "analyst.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.warehouse.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "warehouse.database_path must not be empty".to_string(),
        });
    }

    if config.fallback.row_limit < 1 {
        errors.push(ConfigError::Validation {
            message: "fallback.row_limit must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

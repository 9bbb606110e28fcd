// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Vigil configuration system.

use vigil_config::diagnostic::{suggest_key, ConfigError};
use vigil_config::model::VigilConfig;
use vigil_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
name = "soc-desk"
log_level = "debug"

[analyst]
enabled = true
endpoint = "https://analyst.example.com/api/v2/message"
token = "secret"
token_type = "KEYPAIR_JWT"
semantic_model = "@security.public.models/security.yaml"
timeout_secs = 15

[warehouse]
database_path = "/tmp/vigil-test.db"
cache_ttl_secs = 0
seed_demo_data = false

[fallback]
row_limit = 25
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "soc-desk");
    assert_eq!(config.app.log_level, "debug");
    assert!(config.analyst.enabled);
    assert_eq!(config.analyst.token.as_deref(), Some("secret"));
    assert_eq!(config.analyst.token_type.as_deref(), Some("KEYPAIR_JWT"));
    assert_eq!(config.analyst.timeout_secs, 15);
    assert_eq!(config.warehouse.database_path, "/tmp/vigil-test.db");
    assert_eq!(config.warehouse.cache_ttl_secs, 0);
    assert!(!config.warehouse.seed_demo_data);
    assert_eq!(config.fallback.row_limit, 25);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "vigil");
    assert_eq!(config.app.log_level, "info");
    assert!(!config.analyst.enabled);
    assert!(config.analyst.endpoint.is_none());
    assert!(config.analyst.semantic_model.is_none());
    assert_eq!(config.analyst.timeout_secs, 30);
    assert!(config.warehouse.database_path.ends_with("warehouse.db"));
    assert_eq!(config.warehouse.cache_ttl_secs, 300);
    assert!(config.warehouse.seed_demo_data);
    assert_eq!(config.fallback.row_limit, 10);
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[dashboard]
theme = "dark"
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("dashboard"),
        "error should mention unknown field, got: {err_str}"
    );
}

#[test]
fn dotted_override_reaches_nested_key() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: VigilConfig = Figment::new()
        .merge(Serialized::defaults(VigilConfig::default()))
        .merge(Toml::string("[fallback]\nrow_limit = 5\n"))
        .merge(("fallback.row_limit", 50))
        .extract()
        .expect("should merge override");

    assert_eq!(config.fallback.row_limit, 50);
}

#[test]
fn typo_suggestions() {
    assert_eq!(
        suggest_key("cache_ttl_sec", &["database_path", "cache_ttl_secs", "seed_demo_data"]),
        Some("cache_ttl_secs".to_string())
    );
    assert_eq!(
        suggest_key("endpont", &["enabled", "endpoint", "token"]),
        Some("endpoint".to_string())
    );
    assert!(suggest_key("qqqq", &["row_limit"]).is_none());
}

#[test]
fn unknown_key_error_carries_suggestion_and_valid_keys() {
    let toml = r#"
[analyst]
semantic_modle = "@stage/model.yaml"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "semantic_modle"
                && suggestion.as_deref() == Some("semantic_model")
                && valid_keys.contains("timeout_secs")
        })
    });
    assert!(found, "expected UnknownKey for semantic_modle, got: {errors:?}");
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[fallback]
row_limit = "ten"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_errors_surface_through_load() {
    let toml = r#"
[analyst]
enabled = true

[fallback]
row_limit = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn unknown_key_diagnostic_renders() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "row_limt".to_string(),
        suggestion: Some("row_limit".to_string()),
        valid_keys: "row_limit".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `row_limit`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("row_limt"));
}

#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vigil.toml");
    std::fs::write(&path, "[app]\nname = \"from-file\"\n").expect("write config");

    let config = load_and_validate_path(&path).expect("file config should validate");
    assert_eq!(config.app.name, "from-file");
}

#[test]
fn explicit_path_unknown_key_points_into_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vigil.toml");
    std::fs::write(&path, "[warehouse]\ncache_tl_secs = 10\n").expect("write config");

    let errors = load_and_validate_path(&path).expect_err("should reject typo");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "cache_tl_secs" && suggestion.as_deref() == Some("cache_ttl_secs")
    )));
}

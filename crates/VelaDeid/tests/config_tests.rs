mod common;

use std::io::Write;

use common::patient;
use serde_json::{Value, json};
use vela_deid::{DeidConfig, DeidError, DeidentificationEngine};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_compile_and_apply_rule_file() {
    let file = write_config(
        r#"{
            "fhirPathRules": [
                {"matchType": "suffix", "pattern": "extension", "action": "redact"},
                {"matchType": "pathExpression", "pattern": "Patient.name.family",
                 "action": "replace", "replacement": "REDACTED"},
                {"matchType": "suffix", "pattern": "identifier", "action": "hash"}
            ]
        }"#,
    );

    let rules = DeidConfig::from_path(file.path()).unwrap().compile().unwrap();
    // The unrecognized "hash" action was skipped silently.
    assert_eq!(rules.len(), 2);

    let mut doc = patient();
    DeidentificationEngine::new(rules).deidentify(&mut doc);
    assert_eq!(doc["extension"], Value::Null);
    assert_eq!(doc["name"][0]["family"], json!("REDACTED"));
}

#[test]
fn test_malformed_pattern_fails_at_compile_time() {
    let file = write_config(
        r#"{
            "fhirPathRules": [
                {"matchType": "pathExpression", "pattern": "nodesByType(HumanName).given",
                 "action": "redact"}
            ]
        }"#,
    );

    let err = DeidConfig::from_path(file.path())
        .unwrap()
        .compile()
        .unwrap_err();
    match err {
        DeidError::InvalidPathExpression { pattern, .. } => {
            assert_eq!(pattern, "nodesByType(HumanName).given");
        }
        other => panic!("expected InvalidPathExpression, got {other}"),
    }
}

#[test]
fn test_invalid_json_is_a_serialization_error() {
    let file = write_config("{ not json");
    let err = DeidConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, DeidError::SerializationError(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = DeidConfig::from_path("/nonexistent/deid-rules.json").unwrap_err();
    assert!(matches!(err, DeidError::IoError(_)));
}

#[test]
fn test_config_round_trips_through_serde() {
    let config = DeidConfig {
        fhir_path_rules: vec![vela_deid::RuleConfig {
            match_type: vela_deid::MatchType::PathExpression,
            pattern: "nodesByType('Reference').reference".to_string(),
            action: "redact".to_string(),
            replacement: None,
        }],
    };
    let rendered = serde_json::to_value(&config).unwrap();
    assert_eq!(
        rendered,
        json!({
            "fhirPathRules": [{
                "matchType": "pathExpression",
                "pattern": "nodesByType('Reference').reference",
                "action": "redact"
            }]
        })
    );
    let reloaded: DeidConfig = serde_json::from_value(rendered).unwrap();
    assert_eq!(reloaded.fhir_path_rules.len(), 1);
}

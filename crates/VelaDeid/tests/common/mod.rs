//! Shared fixtures and helpers for engine and config integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use vela_deid::{MatchType, RuleConfig};

pub fn patient() -> Value {
    json!({
        "resourceType": "Patient",
        "id": "patient1",
        "extension": [{
            "url": "http://example.org/do-not-use/fhir-extensions/height",
            "valueQuantity": {"value": 152.0, "unit": "cm"}
        }],
        "name": [{
            "use": "official",
            "family": "PATIENT1",
            "given": ["SHYLA"]
        }],
        "contact": [{
            "name": {"family": "CONTACT1", "given": ["JO"]},
            "telecom": [{"system": "phone", "value": "555-0100"}]
        }],
        "gender": "female",
        "birthDate": "1974-12-25"
    })
}

pub fn condition() -> Value {
    json!({
        "resourceType": "Condition",
        "id": "f001",
        "code": {
            "coding": [{
                "system": "http://snomed.info/sct",
                "code": "368009",
                "display": "Heart valve disorder"
            }]
        },
        "subject": {
            "reference": "Patient/f001",
            "display": "P. van de Heuvel"
        },
        "encounter": {
            "reference": "Encounter/f003"
        },
        "evidence": [{
            "detail": [{
                "reference": "Patient/f001"
            }]
        }]
    })
}

pub fn suffix(pattern: &str) -> RuleConfig {
    RuleConfig {
        match_type: MatchType::Suffix,
        pattern: pattern.to_string(),
        action: "redact".to_string(),
        replacement: None,
    }
}

pub fn path(pattern: &str) -> RuleConfig {
    RuleConfig {
        match_type: MatchType::PathExpression,
        pattern: pattern.to_string(),
        action: "redact".to_string(),
        replacement: None,
    }
}

pub fn replace(pattern: &str, replacement: Value) -> RuleConfig {
    RuleConfig {
        match_type: MatchType::PathExpression,
        pattern: pattern.to_string(),
        action: "replace".to_string(),
        replacement: Some(replacement),
    }
}

//! Shared fixtures for locator and resolver integration tests.

use serde_json::{Value, json};

/// A Patient with one name, one identifier, and one height extension.
pub fn patient() -> Value {
    json!({
        "resourceType": "Patient",
        "id": "patient1",
        "extension": [{
            "url": "http://example.org/do-not-use/fhir-extensions/height",
            "valueQuantity": {"value": 152.0, "unit": "cm"}
        }],
        "identifier": [{
            "system": "http://hospital.example.org/mrn",
            "value": "12345"
        }],
        "name": [{
            "use": "official",
            "family": "PATIENT1",
            "given": ["SHYLA"]
        }],
        "gender": "female",
        "birthDate": "1974-12-25"
    })
}

/// A Condition referencing Patient/f001, Encounter/f003 and Patient/f001
/// again, in that structural order.
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

//! # Tree Walker / Redactor
//!
//! Single depth-first traversal applying walker-eligible rules in place.
//!
//! The walker visits every node, accumulating a dotted path of field names
//! only — array elements are iterated without extending the path, so the
//! path `name.family` covers `name[0].family` and `name[7].family` alike.
//! At each object field the rules are consulted in declaration order; the
//! first match writes the rule's action value into the field and descent
//! into the former subtree stops there. Fields without a match are
//! descended into normally.

use serde_json::Value;

use crate::rules::Rule;

/// Applies a slice of walker-eligible rules in one mutating traversal.
pub struct TreeRedactor<'r> {
    rules: &'r [Rule],
}

impl<'r> TreeRedactor<'r> {
    pub fn new(rules: &'r [Rule]) -> Self {
        TreeRedactor { rules }
    }

    /// Walks the whole document, mutating matched fields in place.
    pub fn redact(&self, root: &mut Value) {
        let resource_type = root
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_string);
        let mut path = String::new();
        let mut segments = Vec::new();
        self.visit(root, &mut path, &mut segments, resource_type.as_deref());
    }

    fn visit(
        &self,
        node: &mut Value,
        path: &mut String,
        segments: &mut Vec<String>,
        resource_type: Option<&str>,
    ) {
        match node {
            Value::Array(items) => {
                // Indices are not part of the compared path.
                for item in items {
                    self.visit(item, path, segments, resource_type);
                }
            }
            Value::Object(map) => {
                let keys: Vec<String> = map.keys().cloned().collect();
                for key in keys {
                    let base_len = path.len();
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(&key);
                    segments.push(key.clone());

                    let matched = self
                        .rules
                        .iter()
                        .find(|rule| rule.matches_at(path, segments, resource_type));
                    match matched {
                        Some(rule) => {
                            if let Some(slot) = map.get_mut(&key) {
                                *slot = rule.action_value();
                            }
                        }
                        None => {
                            if let Some(child) = map.get_mut(&key) {
                                self.visit(child, path, segments, resource_type);
                            }
                        }
                    }

                    segments.pop();
                    path.truncate(base_len);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MatchType, RuleConfig, RuleSet};
    use serde_json::json;

    fn rules(configs: Vec<RuleConfig>) -> RuleSet {
        RuleSet::compile(configs).unwrap()
    }

    #[test]
    fn test_suffix_match_nulls_field_and_stops_descent() {
        let rule_set = rules(vec![
            RuleConfig {
                match_type: MatchType::Suffix,
                pattern: "name".to_string(),
                action: "redact".to_string(),
                replacement: None,
            },
            RuleConfig {
                match_type: MatchType::Suffix,
                pattern: "family".to_string(),
                action: "replace".to_string(),
                replacement: Some(json!("X")),
            },
        ]);
        let mut doc = json!({
            "resourceType": "Patient",
            "name": [{"family": "PATIENT1"}],
            "agent": {"family": "AGENT1"}
        });

        TreeRedactor::new(rule_set.rules()).redact(&mut doc);

        // name was nulled by the first rule; its family was never visited.
        assert_eq!(doc["name"], Value::Null);
        // The family rule still fired on the untouched sibling branch.
        assert_eq!(doc["agent"]["family"], json!("X"));
    }

    #[test]
    fn test_array_indices_are_transparent() {
        let rule_set = rules(vec![RuleConfig {
            match_type: MatchType::Suffix,
            pattern: "name.given".to_string(),
            action: "redact".to_string(),
            replacement: None,
        }]);
        let mut doc = json!({
            "resourceType": "Patient",
            "name": [
                {"given": ["SHYLA"], "family": "PATIENT1"},
                {"given": ["S."], "family": "P."}
            ]
        });

        TreeRedactor::new(rule_set.rules()).redact(&mut doc);

        assert_eq!(doc["name"][0]["given"], Value::Null);
        assert_eq!(doc["name"][1]["given"], Value::Null);
        assert_eq!(doc["name"][0]["family"], json!("PATIENT1"));
    }
}

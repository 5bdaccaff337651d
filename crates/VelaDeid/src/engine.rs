//! # De-identification Engine
//!
//! Orchestrates rule application over a document: the single-pass tree
//! walker when every rule is walker-eligible, per-rule resolution
//! otherwise. The engine owns the compiled [`RuleSet`] and the
//! [`TypeIndex`]; both are injected at construction and shared immutably
//! across calls, so concurrent `deidentify` calls on distinct documents
//! are independent. Calls on the same document mutate it in place and must
//! be serialized by the caller.

use serde_json::Value;
use vela_fhir_path::{Selector, TypeIndex};

use crate::rules::{Matcher, Rule, RuleSet};
use crate::walker::TreeRedactor;

/// The de-identification engine.
///
/// ```rust
/// use serde_json::json;
/// use vela_deid::{DeidentificationEngine, MatchType, RuleConfig, RuleSet};
///
/// let rules = RuleSet::compile(vec![RuleConfig {
///     match_type: MatchType::PathExpression,
///     pattern: "Patient.name.family".to_string(),
///     action: "redact".to_string(),
///     replacement: None,
/// }])
/// .unwrap();
///
/// let engine = DeidentificationEngine::new(rules);
/// let mut patient = json!({
///     "resourceType": "Patient",
///     "name": [{"family": "PATIENT1", "given": ["SHYLA"]}]
/// });
/// engine.deidentify(&mut patient);
/// assert_eq!(patient["name"][0]["family"], json!(null));
/// assert_eq!(patient["name"][0]["given"], json!(["SHYLA"]));
/// ```
#[derive(Debug, Clone)]
pub struct DeidentificationEngine {
    rules: RuleSet,
    types: TypeIndex,
}

impl DeidentificationEngine {
    /// An engine with the default FHIR element type index.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_type_index(rules, TypeIndex::with_fhir_defaults())
    }

    /// An engine with a caller-supplied type index.
    pub fn with_type_index(rules: RuleSet, types: TypeIndex) -> Self {
        DeidentificationEngine { rules, types }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn types(&self) -> &TypeIndex {
        &self.types
    }

    /// De-identifies `document` in place and returns the same reference.
    ///
    /// Idempotent: fields already nulled match no further rule or are
    /// nulled again.
    pub fn deidentify<'a>(&self, document: &'a mut Value) -> &'a mut Value {
        if self.rules.all_walker_eligible() {
            tracing::debug!(rules = self.rules.len(), "single-pass traversal");
            TreeRedactor::new(self.rules.rules()).redact(document);
        } else {
            tracing::debug!(rules = self.rules.len(), "per-rule application");
            for rule in self.rules.rules() {
                self.apply_rule(document, rule);
            }
        }
        document
    }

    fn apply_rule(&self, document: &mut Value, rule: &Rule) {
        match &rule.matcher {
            Matcher::Suffix(_) => {
                TreeRedactor::new(std::slice::from_ref(rule)).redact(document);
            }
            Matcher::Path(expr) => match &expr.selector {
                Selector::Resource(guard) => {
                    if document.get("resourceType").and_then(Value::as_str)
                        != Some(guard.as_str())
                    {
                        // guard failed: the rule is a no-op for this document
                        return;
                    }
                    apply_segments(document, &expr.segments, rule);
                }
                Selector::Type(type_name) => {
                    self.types
                        .for_each_node_of_type_mut(document, type_name, &mut |node| {
                            apply_segments(node, &expr.segments, rule);
                        });
                }
            },
        }
    }
}

/// Mutable mirror of segment resolution: arrays fan out, the final
/// segment's field is overwritten with the rule's action value, and a
/// missing key ends that branch silently.
fn apply_segments(node: &mut Value, segments: &[String], rule: &Rule) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    match node {
        Value::Array(items) => {
            for item in items {
                apply_segments(item, segments, rule);
            }
        }
        Value::Object(map) => {
            if rest.is_empty() {
                if let Some(slot) = map.get_mut(head.as_str()) {
                    *slot = rule.action_value();
                }
            } else if let Some(child) = map.get_mut(head.as_str()) {
                apply_segments(child, rest, rule);
            }
        }
        _ => {}
    }
}

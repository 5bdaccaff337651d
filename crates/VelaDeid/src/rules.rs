//! # Redaction Rules
//!
//! The declarative rule model: the serde-facing configuration record, the
//! compiled rule representation, and the [`RuleSet`] the engine owns.
//!
//! A rule selects its targets one of two ways:
//!
//! - **suffix** — the pattern is compared by simple string-suffix match
//!   against the dotted field-name path accumulated during a whole-tree
//!   walk (array indices never appear in that path);
//! - **pathExpression** — the pattern is parsed once into a [`PathExpr`]
//!   and resolved from the document root (resource-type guard) or from the
//!   nodes a `nodesByType('T')` selector locates.
//!
//! Compilation is where all validation happens: malformed path expressions
//! are configuration errors, while unrecognized actions drop the rule
//! silently so newer rule files keep working against this engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vela_fhir_path::{PathExpr, Selector, parse_path};

use crate::error::{DeidError, DeidResult};

/// How a rule's pattern selects targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    Suffix,
    PathExpression,
}

/// One rule record as it appears in configuration.
///
/// `action` stays a free string here: unrecognized actions are skipped at
/// compilation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    pub match_type: MatchType,
    pub pattern: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Value>,
}

/// A recognized rule action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Null the matched field.
    Redact,
    /// Overwrite the matched field with the rule's replacement literal.
    Replace,
}

impl Action {
    fn from_config(action: &str) -> Option<Action> {
        match action {
            "redact" => Some(Action::Redact),
            "replace" => Some(Action::Replace),
            _ => None,
        }
    }
}

/// A compiled rule matcher.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Dotted suffix compared against the walker's accumulated path.
    Suffix(String),
    /// Parsed path expression resolved from the root or located nodes.
    Path(PathExpr),
}

/// A compiled, immutable rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub matcher: Matcher,
    pub action: Action,
    pub replacement: Option<Value>,
}

impl Rule {
    /// The value this rule writes into a matched field.
    pub fn action_value(&self) -> Value {
        match self.action {
            Action::Redact => Value::Null,
            // replace without a configured literal degrades to null
            Action::Replace => self.replacement.clone().unwrap_or(Value::Null),
        }
    }

    /// Whether the single-pass tree walker can apply this rule. Typed
    /// (`nodesByType`) rules need per-rule resolution instead.
    pub fn is_walker_eligible(&self) -> bool {
        !matches!(
            &self.matcher,
            Matcher::Path(PathExpr {
                selector: Selector::Type(_),
                ..
            })
        )
    }

    /// Tests this rule against a field reached during a whole-tree walk.
    ///
    /// `path` is the dotted field-name path, `segments` the same path as a
    /// list, and `resource_type` the document's own type tag captured at
    /// traversal start. Suffix rules match by string suffix; rooted path
    /// rules match by full segment consumption under a satisfied guard;
    /// typed rules never match here.
    pub fn matches_at(&self, path: &str, segments: &[String], resource_type: Option<&str>) -> bool {
        match &self.matcher {
            Matcher::Suffix(suffix) => path.ends_with(suffix.as_str()),
            Matcher::Path(expr) => match &expr.selector {
                Selector::Resource(guard) => {
                    resource_type == Some(guard.as_str()) && segments == expr.segments.as_slice()
                }
                Selector::Type(_) => false,
            },
        }
    }
}

/// The immutable, compiled rule set an engine is constructed with.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compiles configuration records into a rule set.
    ///
    /// Fails fast on malformed `pathExpression` patterns. Rules with
    /// unrecognized actions are dropped silently (logged at debug level)
    /// to stay forward-compatible with newer rule files.
    pub fn compile(configs: impl IntoIterator<Item = RuleConfig>) -> DeidResult<RuleSet> {
        let mut rules = Vec::new();
        for config in configs {
            let Some(action) = Action::from_config(&config.action) else {
                tracing::debug!(
                    action = %config.action,
                    pattern = %config.pattern,
                    "skipping rule with unrecognized action"
                );
                continue;
            };
            let matcher = match config.match_type {
                MatchType::Suffix => Matcher::Suffix(config.pattern),
                MatchType::PathExpression => {
                    let expr = parse_path(&config.pattern).map_err(|e| {
                        DeidError::InvalidPathExpression {
                            pattern: config.pattern.clone(),
                            message: e.to_string(),
                        }
                    })?;
                    Matcher::Path(expr)
                }
            };
            rules.push(Rule {
                matcher,
                action,
                replacement: config.replacement,
            });
        }
        Ok(RuleSet { rules })
    }

    /// The compiled rules, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when a single walker traversal can apply every rule.
    pub fn all_walker_eligible(&self) -> bool {
        self.rules.iter().all(Rule::is_walker_eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn suffix_rule(pattern: &str) -> RuleConfig {
        RuleConfig {
            match_type: MatchType::Suffix,
            pattern: pattern.to_string(),
            action: "redact".to_string(),
            replacement: None,
        }
    }

    #[test]
    fn test_unrecognized_action_is_skipped() {
        let configs = vec![
            suffix_rule("name.family"),
            RuleConfig {
                match_type: MatchType::Suffix,
                pattern: "identifier".to_string(),
                action: "hash".to_string(),
                replacement: None,
            },
        ];
        let rules = RuleSet::compile(configs).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_malformed_path_expression_fails_compilation() {
        let config = RuleConfig {
            match_type: MatchType::PathExpression,
            pattern: "Patient..name".to_string(),
            action: "redact".to_string(),
            replacement: None,
        };
        let err = RuleSet::compile(vec![config]).unwrap_err();
        assert!(matches!(err, DeidError::InvalidPathExpression { .. }));
    }

    #[test]
    fn test_suffix_match_is_plain_string_suffix() {
        let rules = RuleSet::compile(vec![suffix_rule("name.family")]).unwrap();
        let rule = &rules.rules()[0];
        let segments = vec!["contact".to_string(), "name".to_string(), "family".to_string()];
        assert!(rule.matches_at("contact.name.family", &segments, Some("Patient")));
        assert!(!rule.matches_at("contact.name.given", &segments, Some("Patient")));
    }

    #[test]
    fn test_rooted_rule_requires_guard_and_full_path() {
        let config = RuleConfig {
            match_type: MatchType::PathExpression,
            pattern: "Patient.name.family".to_string(),
            action: "redact".to_string(),
            replacement: None,
        };
        let rules = RuleSet::compile(vec![config]).unwrap();
        let rule = &rules.rules()[0];
        let segments = vec!["name".to_string(), "family".to_string()];
        assert!(rule.matches_at("name.family", &segments, Some("Patient")));
        assert!(!rule.matches_at("name.family", &segments, Some("Condition")));
        let longer = vec!["contact".to_string(), "name".to_string(), "family".to_string()];
        assert!(!rule.matches_at("contact.name.family", &longer, Some("Patient")));
    }

    #[test]
    fn test_replace_without_literal_degrades_to_null() {
        let rule = Rule {
            matcher: Matcher::Suffix("x".to_string()),
            action: Action::Replace,
            replacement: None,
        };
        assert_eq!(rule.action_value(), Value::Null);
        let rule = Rule {
            replacement: Some(json!("REDACTED")),
            ..rule
        };
        assert_eq!(rule.action_value(), json!("REDACTED"));
    }
}

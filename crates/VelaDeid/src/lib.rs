//! # Vela De-identification Engine
//!
//! Redacts or replaces sensitive fields inside FHIR resources according to
//! a declarative rule set, mutating the supplied document in place.
//!
//! Two rule kinds coexist:
//!
//! - **Suffix rules** match any field whose dotted field-name path ends
//!   with the configured pattern, applied during a single whole-tree walk.
//! - **Path expression rules** resolve a dotted path from the document root
//!   (guarded by resource type, e.g. `Patient.name.given`) or from every
//!   node a `nodesByType('T')` selector locates, then apply the action at
//!   the resolved leaf field.
//!
//! Either way the action is `redact` (null the field, stop descending) or
//! `replace` (overwrite with a configured literal).
//!
//! ## Architecture
//!
//! - [`rules`]: rule records, compilation, the immutable [`RuleSet`]
//! - [`config`]: rule configuration file loading (`fhirPathRules` shape)
//! - [`walker`]: the single-pass suffix tree walker/redactor
//! - [`engine`]: the [`DeidentificationEngine`] orchestrator
//! - [`cli`]: the `deid-cli` command-line surface
//!
//! Path parsing, type location, and resolution live in the
//! `vela-fhir-path` crate.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use vela_deid::{DeidentificationEngine, MatchType, RuleConfig, RuleSet};
//!
//! let rules = RuleSet::compile(vec![RuleConfig {
//!     match_type: MatchType::Suffix,
//!     pattern: "extension".to_string(),
//!     action: "redact".to_string(),
//!     replacement: None,
//! }])
//! .unwrap();
//!
//! let engine = DeidentificationEngine::new(rules);
//! let mut patient = json!({
//!     "resourceType": "Patient",
//!     "extension": [{"url": "http://example.org/height"}],
//!     "gender": "female"
//! });
//! engine.deidentify(&mut patient);
//! assert_eq!(patient["extension"], json!(null));
//! assert_eq!(patient["gender"], json!("female"));
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod walker;

pub use config::DeidConfig;
pub use engine::DeidentificationEngine;
pub use error::{DeidError, DeidResult};
pub use rules::{Action, MatchType, Matcher, Rule, RuleConfig, RuleSet};
pub use walker::TreeRedactor;

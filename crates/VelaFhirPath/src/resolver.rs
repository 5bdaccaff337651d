//! # Path Resolver
//!
//! Resolves a parsed [`PathExpr`] against a document tree, producing the
//! node(s) the expression addresses.
//!
//! Resolution consumes one segment at a time. Arrays fan out: the same
//! remaining segments are mapped over every element, each element resolving
//! independently so that a missing field in one slot never affects its
//! siblings. Missing fields, scalars encountered mid-path, and failed
//! resource-type guards all resolve to [`Resolution::Empty`] — they are
//! no-ops, never errors.
//!
//! ## Result shape
//!
//! [`Resolution`] is the small lattice every resolution lands in:
//!
//! - `Empty` — nothing addressed (undefined)
//! - `Node` — exactly one node
//! - `Set` — an ordered sequence of independent sub-results, one per array
//!   element fanned over
//!
//! ```rust
//! use serde_json::json;
//! use vela_fhir_path::parser::parse_path;
//! use vela_fhir_path::locator::TypeIndex;
//! use vela_fhir_path::resolver::Resolver;
//!
//! let patient = json!({
//!     "resourceType": "Patient",
//!     "name": [{"family": "PATIENT1", "given": ["SHYLA"]}]
//! });
//! let types = TypeIndex::with_fhir_defaults();
//! let resolver = Resolver::new(&types);
//!
//! let expr = parse_path("Patient.name.family").unwrap();
//! assert_eq!(resolver.resolve(&patient, &expr).to_json(), json!(["PATIENT1"]));
//! ```

use serde_json::Value;

use crate::locator::TypeIndex;
use crate::parser::{PathExpr, Selector};

/// The result of resolving a path expression against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Nothing addressed: a missing field, a scalar mid-path, or a failed
    /// type guard.
    Empty,
    /// A single addressed node.
    Node(&'a Value),
    /// An ordered sequence of independent sub-results from array fan-out.
    Set(Vec<Resolution<'a>>),
}

impl<'a> Resolution<'a> {
    /// True when nothing was addressed at all — `Empty`, or a `Set` whose
    /// every slot is itself empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Resolution::Empty => true,
            Resolution::Node(_) => false,
            Resolution::Set(slots) => slots.iter().all(Resolution::is_empty),
        }
    }

    /// Every addressed node in order, skipping empty slots.
    pub fn nodes(&self) -> Vec<&'a Value> {
        let mut out = Vec::new();
        self.push_nodes(&mut out);
        out
    }

    fn push_nodes(&self, out: &mut Vec<&'a Value>) {
        match self {
            Resolution::Empty => {}
            Resolution::Node(value) => out.push(value),
            Resolution::Set(slots) => {
                for slot in slots {
                    slot.push_nodes(out);
                }
            }
        }
    }

    /// Renders the resolution as JSON: `Empty` becomes null, a `Set`
    /// becomes an array with one entry per slot.
    pub fn to_json(&self) -> Value {
        match self {
            Resolution::Empty => Value::Null,
            Resolution::Node(value) => (*value).clone(),
            Resolution::Set(slots) => Value::Array(slots.iter().map(Resolution::to_json).collect()),
        }
    }
}

/// Resolves path expressions against documents, using a [`TypeIndex`] for
/// `nodesByType` selectors.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'t> {
    types: &'t TypeIndex,
}

impl<'t> Resolver<'t> {
    pub fn new(types: &'t TypeIndex) -> Self {
        Resolver { types }
    }

    /// Resolves `expr` against `root`.
    ///
    /// Rooted expressions require the document's `resourceType` to equal the
    /// guard; otherwise the whole resolution is `Empty` and the rule using
    /// it becomes a no-op. Typed expressions locate every node of the named
    /// type, resolve the segments independently against each, and collect
    /// the per-node results into a `Set`, flattened one level: a per-node
    /// fan-out splices its slots, and a direct array field splices its
    /// elements.
    pub fn resolve<'a>(&self, root: &'a Value, expr: &PathExpr) -> Resolution<'a> {
        match &expr.selector {
            Selector::Resource(guard) => {
                if root.get("resourceType").and_then(Value::as_str) != Some(guard.as_str()) {
                    return Resolution::Empty;
                }
                resolve_segments(root, &expr.segments)
            }
            Selector::Type(type_name) => {
                let located = self.types.find_nodes_by_type(root, type_name);
                if located.is_empty() {
                    return Resolution::Empty;
                }
                let mut slots = Vec::new();
                for node in located {
                    match resolve_segments(node, &expr.segments) {
                        Resolution::Set(inner) => slots.extend(inner),
                        Resolution::Node(Value::Array(items)) => {
                            slots.extend(items.iter().map(Resolution::Node));
                        }
                        other => slots.push(other),
                    }
                }
                Resolution::Set(slots)
            }
        }
    }
}

/// Resolves a segment list against a node.
///
/// - Empty segment list: the node itself.
/// - Array: the same remaining segments map over every element, one
///   independent sub-result per slot.
/// - Object: descend on the key if present, `Empty` otherwise.
/// - Scalar or null with segments remaining: `Empty`.
pub fn resolve_segments<'a>(node: &'a Value, segments: &[String]) -> Resolution<'a> {
    let Some((head, rest)) = segments.split_first() else {
        return Resolution::Node(node);
    };
    match node {
        Value::Array(items) => Resolution::Set(
            items
                .iter()
                .map(|item| resolve_segments(item, segments))
                .collect(),
        ),
        Value::Object(map) => match map.get(head.as_str()) {
            Some(child) => resolve_segments(child, rest),
            None => Resolution::Empty,
        },
        _ => Resolution::Empty,
    }
}

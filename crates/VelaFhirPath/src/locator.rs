//! # Type Locator
//!
//! Finds every node of a given logical type anywhere in a document tree.
//!
//! A document is a plain `serde_json::Value`; nested objects carry no type
//! information of their own. The logical type of a node is therefore read
//! from two explicit sources, in order:
//!
//! 1. the node's own `resourceType` field (resources tag themselves), then
//! 2. a companion [`TypeIndex`] entry for the field name the node was
//!    reached through (`name` → `HumanName`, `subject` → `Reference`, …).
//!
//! The index is populated at construction time and injected wherever type
//! lookups are needed — there is no runtime reflection and no global state.
//! [`TypeIndex::with_fhir_defaults`] seeds the common FHIR R4 element types;
//! callers with profiles or extensions add their own entries.

use std::collections::HashMap;

use serde_json::Value;

/// Companion metadata mapping field names to element type names, plus the
/// search operations built on it.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    by_field: HashMap<String, String>,
}

impl TypeIndex {
    /// An empty index. Only nodes with their own `resourceType` will carry
    /// a logical type.
    pub fn new() -> Self {
        TypeIndex {
            by_field: HashMap::new(),
        }
    }

    /// An index seeded with the common FHIR R4 element types.
    pub fn with_fhir_defaults() -> Self {
        let mut index = TypeIndex::new();
        for field in ["name"] {
            index.insert(field, "HumanName");
        }
        for field in ["extension", "modifierExtension"] {
            index.insert(field, "Extension");
        }
        // Reference-typed fields of the resources this engine is commonly
        // pointed at (Patient, Condition, Encounter, Observation).
        for field in [
            "subject",
            "encounter",
            "patient",
            "individual",
            "detail",
            "recorder",
            "asserter",
            "basedOn",
            "partOf",
            "managingOrganization",
            "generalPractitioner",
            "serviceProvider",
            "organization",
        ] {
            index.insert(field, "Reference");
        }
        index.insert("identifier", "Identifier");
        index.insert("telecom", "ContactPoint");
        index.insert("address", "Address");
        index.insert("period", "Period");
        index
    }

    /// Adds or overrides a field-name → element-type entry.
    pub fn insert(&mut self, field: impl Into<String>, element_type: impl Into<String>) {
        self.by_field.insert(field.into(), element_type.into());
    }

    /// The element type registered for a field name, if any.
    pub fn element_type(&self, field: &str) -> Option<&str> {
        self.by_field.get(field).map(String::as_str)
    }

    /// The logical type tag of a node: its own `resourceType` if present,
    /// else the index entry for the field it was reached through.
    pub fn tag_of<'a>(&'a self, node: &'a Value, via_field: Option<&str>) -> Option<&'a str> {
        if let Some(resource_type) = node.get("resourceType").and_then(Value::as_str) {
            return Some(resource_type);
        }
        via_field.and_then(|field| self.element_type(field))
    }

    /// Collects every node of logical type `type_name`, in document order.
    ///
    /// Arrays are flattened transparently. A matching node is not searched
    /// further — the first match along a branch terminates descent into that
    /// branch — while sibling branches continue independently. Returns an
    /// empty vector when nothing matches.
    pub fn find_nodes_by_type<'a>(&self, root: &'a Value, type_name: &str) -> Vec<&'a Value> {
        let mut found = Vec::new();
        self.collect(root, None, type_name, &mut found);
        tracing::trace!(type_name, count = found.len(), "located typed nodes");
        found
    }

    fn collect<'a>(
        &self,
        node: &'a Value,
        via_field: Option<&str>,
        type_name: &str,
        out: &mut Vec<&'a Value>,
    ) {
        match node {
            Value::Array(items) => {
                // Elements inherit the field the array was reached through.
                for item in items {
                    self.collect(item, via_field, type_name, out);
                }
            }
            Value::Object(map) => {
                if self.tag_of(node, via_field) == Some(type_name) {
                    out.push(node);
                    return;
                }
                for (key, child) in map {
                    self.collect(child, Some(key.as_str()), type_name, out);
                }
            }
            _ => {}
        }
    }

    /// Visits every node of logical type `type_name` with mutable access,
    /// in the same order and with the same descent rule as
    /// [`find_nodes_by_type`](Self::find_nodes_by_type).
    pub fn for_each_node_of_type_mut(
        &self,
        root: &mut Value,
        type_name: &str,
        f: &mut dyn FnMut(&mut Value),
    ) {
        self.visit_mut(root, None, type_name, f);
    }

    fn visit_mut(
        &self,
        node: &mut Value,
        via_field: Option<&str>,
        type_name: &str,
        f: &mut dyn FnMut(&mut Value),
    ) {
        match node {
            Value::Array(items) => {
                for item in items {
                    self.visit_mut(item, via_field, type_name, f);
                }
            }
            Value::Object(_) => {
                if self.tag_of(node, via_field) == Some(type_name) {
                    f(node);
                    return;
                }
                if let Value::Object(map) = node {
                    for (key, child) in map.iter_mut() {
                        self.visit_mut(child, Some(key.as_str()), type_name, f);
                    }
                }
            }
            _ => {}
        }
    }
}

//! # Path Expression Parser
//!
//! This module parses the small path language used by de-identification
//! rules. It is intentionally a narrow subset of FHIRPath: dotted field
//! access, positional-agnostic array traversal, and the single
//! `nodesByType('Type')` selector. Nothing else — no filters, no operators,
//! no indexing.
//!
//! ## Grammar
//!
//! ```text
//! pathExpr     := typeSelector segment+ | identifier segment+
//! typeSelector := "nodesByType" "(" "'" identifier "'" ")"
//! segment      := "." identifier
//! identifier   := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! An expression starting with `nodesByType('T')` selects all nodes of
//! logical type `T` anywhere in a document before resolving the remaining
//! segments against each of them. An expression starting with a bare
//! identifier treats that identifier as a resource-type guard and resolves
//! the remaining segments from the document root.
//!
//! At least one segment must follow the selector or guard: a rule targets a
//! field, never the document itself.
//!
//! ## Examples
//!
//! ```rust
//! use vela_fhir_path::parser::{parse_path, Selector};
//!
//! let expr = parse_path("Patient.name.given").unwrap();
//! assert_eq!(expr.selector, Selector::Resource("Patient".to_string()));
//! assert_eq!(expr.segments, vec!["name".to_string(), "given".to_string()]);
//!
//! let expr = parse_path("nodesByType('HumanName').family").unwrap();
//! assert_eq!(expr.selector, Selector::Type("HumanName".to_string()));
//! ```
//!
//! Parsing is meant to happen once, when a rule set is compiled, so that a
//! malformed pattern surfaces as a configuration error instead of a silently
//! skipped redaction during traversal.

use std::fmt;

use chumsky::Parser;
use chumsky::error::Rich;
use chumsky::prelude::*;

use crate::error::{PathError, PathResult};

/// How a path expression anchors itself to a document before its segments
/// are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `nodesByType('T')` — resolve against every node of logical type `T`
    /// anywhere in the document.
    Type(String),
    /// A leading resource-type identifier — resolve from the document root,
    /// guarded on the document's own `resourceType`.
    Resource(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => write!(f, "nodesByType('{}')", name),
            Selector::Resource(name) => write!(f, "{}", name),
        }
    }
}

/// A parsed path expression: a selector plus the field segments to resolve.
///
/// Segments are field names only. Arrays are traversed transparently during
/// resolution and are never addressed by index, so no index syntax exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub selector: Selector,
    pub segments: Vec<String>,
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        for segment in &self.segments {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

/// Builds the path expression parser.
///
/// The returned parser consumes an entire input string (trailing garbage is
/// a parse error) and produces a [`PathExpr`]. Errors are reported with
/// `chumsky`'s `Rich` diagnostics.
pub fn parser<'src>()
-> impl Parser<'src, &'src str, PathExpr, extra::Err<Rich<'src, char>>> + Clone {
    // Identifier: leading alpha or underscore, then alphanumerics/underscores
    let ident = any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated()
                .collect::<String>(),
        )
        .map(|(first, rest): (char, String)| format!("{}{}", first, rest))
        .boxed();

    // Type selector: nodesByType('T')
    // The type name is a single-quoted identifier; quoting is mandatory.
    let type_selector = just("nodesByType")
        .ignore_then(just('('))
        .ignore_then(just('\''))
        .ignore_then(ident.clone())
        .then_ignore(just('\''))
        .then_ignore(just(')'))
        .map(Selector::Type);

    let resource_guard = ident.clone().map(Selector::Resource);

    // One or more dotted segments after the selector
    let segments = just('.')
        .ignore_then(ident)
        .repeated()
        .at_least(1)
        .collect::<Vec<String>>();

    // Try the type selector first: "nodesByType" is itself a valid
    // identifier, so the resource-guard alternative would otherwise eat it.
    choice((type_selector, resource_guard))
        .then(segments)
        .then_ignore(end())
        .map(|(selector, segments)| PathExpr { selector, segments })
}

/// Parses a path expression, converting diagnostics into a [`PathError`].
pub fn parse_path(input: &str) -> PathResult<PathExpr> {
    parser().parse(input).into_result().map_err(|errors| {
        let rendered = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        PathError::ParseError(format!("invalid path expression '{}': {}", input, rendered))
    })
}

//! # Vela Path Expression Engine
//!
//! This crate implements the path language used to locate redaction targets
//! inside FHIR documents: a deliberately small subset of FHIRPath covering
//! dotted field access, positional-agnostic array traversal, and the single
//! `nodesByType('Type')` selector.
//!
//! ## Architecture
//!
//! - **Parser** ([`parser`]): turns rule pattern text into a [`PathExpr`]
//!   (`chumsky` combinators, fail-fast `Rich` diagnostics)
//! - **Type Locator** ([`locator`]): finds every node of a logical type in a
//!   document, driven by an injected [`TypeIndex`] instead of runtime type
//!   reflection
//! - **Path Resolver** ([`resolver`]): resolves segments with transparent
//!   array fan-out, landing in the [`Resolution`] result shape
//!
//! Documents are plain `serde_json::Value` trees. The crate never mutates
//! them; mutation belongs to the de-identification engine built on top.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use vela_fhir_path::{parse_path, Resolver, TypeIndex};
//!
//! let patient = json!({
//!     "resourceType": "Patient",
//!     "name": [{"family": "PATIENT1", "given": ["SHYLA"]}]
//! });
//!
//! let types = TypeIndex::with_fhir_defaults();
//! let resolver = Resolver::new(&types);
//!
//! let expr = parse_path("nodesByType('HumanName').given").unwrap();
//! assert_eq!(resolver.resolve(&patient, &expr).to_json(), json!(["SHYLA"]));
//! ```

pub mod error;
pub mod locator;
pub mod parser;
pub mod resolver;

pub use error::{PathError, PathResult};
pub use locator::TypeIndex;
pub use parser::{PathExpr, Selector, parse_path};
pub use resolver::{Resolution, Resolver, resolve_segments};

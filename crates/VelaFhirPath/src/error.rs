//! Error types for path expression parsing and resolution
//!
//! Resolution itself never fails for structurally well-formed documents
//! (missing fields and failed guards resolve to empty results), so the only
//! fallible operation in this crate is parsing a path expression.

use std::fmt;

/// Result type alias for path expression operations
pub type PathResult<T> = Result<T, PathError>;

/// Error types for path expression operations
#[derive(Debug)]
pub enum PathError {
    /// Parse error with rendered diagnostics
    ParseError(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for PathError {}

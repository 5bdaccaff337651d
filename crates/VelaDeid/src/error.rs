//! Error handling for rule-set compilation and the CLI surface.
//!
//! Traversal and resolution never fail for well-formed documents; the
//! fallible operations are loading a rule configuration and compiling its
//! path expressions. Both fail fast, before any document is touched, so a
//! malformed pattern cannot silently skip an intended redaction.

use thiserror::Error;

/// Result type alias for de-identification operations
pub type DeidResult<T> = Result<T, DeidError>;

/// Error types for de-identification operations
#[derive(Error, Debug)]
pub enum DeidError {
    /// A `pathExpression` rule pattern failed to parse.
    ///
    /// Raised at rule-set compilation time, never during traversal.
    #[error("Invalid path expression '{pattern}': {message}")]
    InvalidPathExpression { pattern: String, message: String },

    /// File I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

//! Error types for matching and classification.

use thiserror::Error;

/// Errors raised by the matching engine.
///
/// Both variants are fatal: they indicate a mismatch between configuration
/// and data, never a legitimately unmatched row. A source row with no
/// qualifying match is represented by absence, not by an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed filter expression, unrecognized output provenance tag,
    /// or other invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
    /// A declared column is absent from a record's header.
    #[error("column [{0}] is not a valid column header")]
    Schema(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

//! Error types for structure operations

use thiserror::Error;

/// Errors that can occur when working with structure data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MolError {
    /// Coordinate count doesn't match atom count
    #[error("Coordinate count mismatch: expected {expected}, got {actual}")]
    CoordinateMismatch { expected: usize, actual: usize },

    /// A filter was built from an empty element list
    #[error("Element filter must name at least one element")]
    EmptyFilter,
}

/// Result type for structure operations
pub type MolResult<T> = Result<T, MolError>;

//! Error types for geometry utilities.

use thiserror::Error;

/// Errors that can occur when combining measured points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// An aggregate was requested over zero points.
    #[error("point set is empty")]
    EmptyInput,

    /// Not enough points to form a single triangle.
    #[error("need at least {required} points, got {found}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        found: usize,
    },
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

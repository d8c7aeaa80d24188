//! Errors raised by the geometry kernel.

use thiserror::Error;

/// Errors that can occur while building or combining geometric values.
///
/// Per-ray misses are never reported through this type; an intersection
/// routine that finds nothing returns `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

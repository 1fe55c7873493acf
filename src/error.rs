//! Error types for kdthree.

use crate::point::Axis;
use thiserror::Error;

/// Errors reported by tree operations.
///
/// Queries on an empty tree are not errors, they simply come back empty.
#[derive(Debug, Error)]
pub enum KdTreeError {
    /// A point carried a NaN or infinite coordinate.
    #[error("non-finite {axis} coordinate: {value}")]
    NonFiniteCoordinate {
        /// Axis of the offending coordinate.
        axis: Axis,
        /// The value that was supplied.
        value: f64,
    },

    /// A sphere query was given a negative or NaN radius.
    #[error("sphere radius must be a non-negative number, got {0}")]
    NegativeRadius(f64),

    /// Exporting the tree snapshot failed.
    #[error("failed to serialize tree: {0}")]
    Serialization(#[from] serde_json::Error),
}

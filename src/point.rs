use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::KdTreeError;

/// A point in 3D space as `[x, y, z]`.
pub type Point = [f64; 3];

/// The coordinate a tree level splits on.
///
/// Levels cycle X → Y → Z → X with increasing depth, so the axis of a node is
/// fully determined by its depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The axis used by the children of a node splitting on `self`.
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// The axis of a node at the given depth (root = 0).
    pub fn from_depth(depth: usize) -> Axis {
        Self::ALL[depth % 3]
    }

    /// Index of this axis into a `[x, y, z]` array.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    distance_sq(a, b).sqrt()
}

/// Squared Euclidean distance between two points.
pub fn distance_sq(a: &Point, b: &Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Lexicographic ordering on (x, y, z).
///
/// Only meaningful for finite points, which is all the tree ever stores.
pub fn cmp_points(a: &Point, b: &Point) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Rejects points carrying NaN or infinite coordinates.
pub(crate) fn check_finite(point: &Point) -> Result<(), KdTreeError> {
    for axis in Axis::ALL {
        let value = point[axis.index()];
        if !value.is_finite() {
            return Err(KdTreeError::NonFiniteCoordinate { axis, value });
        }
    }
    Ok(())
}

use std::collections::BTreeMap;

use crate::layout::DisplayCoord;
use crate::point::Point;

/// A node visited by an exact lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStep {
    pub point: Point,
    /// Euclidean distance from this node to the lookup target.
    pub distance: f64,
}

/// Result of [`KdTree::find`](crate::KdTree::find).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lookup {
    pub found: bool,
    /// Every node on the descent, keyed by its diagram position.
    ///
    /// Iteration follows rank order, not the root-first visiting order; use
    /// [`Lookup::descent`] for the latter.
    pub path: BTreeMap<DisplayCoord, PathStep>,
}

impl Lookup {
    /// The path from the root downwards.
    pub fn descent(&self) -> Vec<(DisplayCoord, PathStep)> {
        let mut steps: Vec<_> = self.path.iter().map(|(c, s)| (*c, *s)).collect();
        steps.sort_by_key(|(c, _)| c.depth);
        steps
    }
}

/// A node visited by a sphere query, in visitation order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceStep {
    pub coord: DisplayCoord,
    pub point: Point,
}

/// Result of [`KdTree::find_sphere_neighbors`](crate::KdTree::find_sphere_neighbors).
#[derive(Clone, Debug, PartialEq)]
pub struct SphereQuery {
    /// Tree points within the radius, the center itself excluded, sorted by (x, y, z).
    pub neighbors: Vec<Point>,
    /// Whether the center is itself a tree point.
    pub center_found: bool,
    /// Every visited node in visitation order.
    pub trace: Vec<TraceStep>,
    /// One leading `None` followed by one entry per visit: the node's diagram
    /// position when it lies inside the sphere, `None` otherwise.
    pub membership: Vec<Option<DisplayCoord>>,
}

impl SphereQuery {
    pub(crate) fn empty(center_found: bool) -> Self {
        Self {
            neighbors: Vec::new(),
            center_found,
            trace: Vec::new(),
            membership: vec![None],
        }
    }

    /// Number of visited nodes that fell inside the sphere.
    pub fn hits(&self) -> usize {
        self.membership.iter().filter(|m| m.is_some()).count()
    }
}

use log::{debug, trace};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::cmp::Ordering;

use crate::bounds::BoundingBox;
use crate::error::KdTreeError;
use crate::layout::Layout;
use crate::point::{check_finite, cmp_points, distance, Axis, Point};
use crate::query::{Lookup, PathStep, SphereQuery, TraceStep};

/// Sentinel for a missing child or parent link.
pub(crate) const NONE: u32 = u32::MAX;

/// Padding applied around the first point when setting the overall bounds.
pub const OVERALL_BOUND_MARGIN: f64 = 10.0;

/// The points of the demonstration tree shown by the viewer on startup.
pub const SAMPLE_POINTS: [Point; 13] = [
    [50.0, 50.0, 50.0],
    [25.0, 25.0, 25.0],
    [25.0, 50.0, 20.0],
    [25.0, 10.0, 10.0],
    [25.0, 10.0, 5.0],
    [25.0, 10.0, 20.0],
    [75.0, 75.0, 75.0],
    [75.0, 10.0, 5.0],
    [75.0, 100.0, 30.0],
    [75.0, 10.0, 20.0],
    [75.0, 10.0, 50.0],
    [75.0, 100.0, 70.0],
    [75.0, 100.0, 90.0],
];

#[derive(Clone, Copy, Debug)]
pub struct KdNode {
    pub(crate) point: Point,
    pub(crate) axis: Axis,
    // Links are arena indices, NONE if absent. The parent link is only read.
    pub(crate) parent: u32,
    pub(crate) left: u32,
    pub(crate) right: u32,
}

impl KdNode {
    fn new(point: Point, axis: Axis, parent: u32) -> Self {
        KdNode {
            point,
            axis,
            parent,
            left: NONE,
            right: NONE,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// The axis this node splits its children on.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn parent(&self) -> Option<usize> {
        link(self.parent)
    }

    pub fn left(&self) -> Option<usize> {
        link(self.left)
    }

    pub fn right(&self) -> Option<usize> {
        link(self.right)
    }

    /// Coordinate of this node on its splitting axis.
    pub fn split_value(&self) -> f64 {
        self.point[self.axis.index()]
    }
}

fn link(idx: u32) -> Option<usize> {
    if idx == NONE { None } else { Some(idx as usize) }
}

/// A 3D K-D tree built by successive insertion.
///
/// Nodes live in an arena; the root is always the first node inserted. The
/// tree is never rebalanced, so its shape is fully determined by insertion
/// order. Points that tie with a node on that node's splitting axis are
/// dropped on insertion.
#[derive(Clone, Debug)]
pub struct KdTree {
    pub(crate) nodes: Vec<KdNode>,
    pub(crate) extent: BoundingBox<3>,
    // Set from the first point and never updated; nothing reads them.
    min_overall_bound: Option<f64>,
    max_overall_bound: Option<f64>,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KdTree {
    pub fn new() -> Self {
        Self::with_extent(BoundingBox::default())
    }

    /// Creates an empty tree whose barriers and random points use `extent`.
    pub fn with_extent(extent: BoundingBox<3>) -> Self {
        KdTree {
            nodes: Vec::new(),
            extent,
            min_overall_bound: None,
            max_overall_bound: None,
        }
    }

    /// Builds a tree by inserting `points` in order.
    pub fn from_points<I>(points: I) -> Result<Self, KdTreeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = Self::new();
        tree.extend(points)?;
        Ok(tree)
    }

    /// The demonstration tree built from [`SAMPLE_POINTS`].
    pub fn sample() -> Self {
        let mut tree = Self::new();
        for point in SAMPLE_POINTS {
            tree.insert(point);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn extent(&self) -> &BoundingBox<3> {
        &self.extent
    }

    /// The padded `(min, max)` range taken from the first inserted point.
    pub fn overall_bounds(&self) -> Option<(f64, f64)> {
        Some((self.min_overall_bound?, self.max_overall_bound?))
    }

    pub fn root(&self) -> Option<&KdNode> {
        self.nodes.first()
    }

    pub fn node(&self, index: usize) -> Option<&KdNode> {
        self.nodes.get(index)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    fn root_link(&self) -> u32 {
        if self.nodes.is_empty() { NONE } else { 0 }
    }

    /// Inserts a point.
    ///
    /// Returns `Ok(false)` when the point was dropped because it ties with a
    /// node on that node's splitting axis.
    pub fn add(&mut self, point: Point) -> Result<bool, KdTreeError> {
        check_finite(&point)?;
        Ok(self.insert(point))
    }

    /// Inserts every point in order, returning how many were kept.
    pub fn extend<I>(&mut self, points: I) -> Result<usize, KdTreeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut inserted = 0;
        for point in points {
            if self.add(point)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn insert(&mut self, point: Point) -> bool {
        if self.nodes.is_empty() {
            self.nodes.push(KdNode::new(point, Axis::X, NONE));
            let lo = point[0].min(point[1]).min(point[2]);
            let hi = point[0].max(point[1]).max(point[2]);
            self.min_overall_bound = Some(lo - OVERALL_BOUND_MARGIN);
            self.max_overall_bound = Some(hi + OVERALL_BOUND_MARGIN);
            return true;
        }

        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            let axis = node.axis;
            let go_left = match point[axis.index()].partial_cmp(&node.split_value()) {
                Some(Ordering::Less) => true,
                Some(Ordering::Greater) => false,
                _ => {
                    debug!("dropping {:?}: ties with {:?} on {}", point, node.point, axis);
                    return false;
                }
            };

            let child = if go_left { node.left } else { node.right };
            if child != NONE {
                idx = child as usize;
                continue;
            }

            // Arena indices are u32 with u32::MAX reserved for NONE.
            debug_assert!(self.nodes.len() < NONE as usize, "tree is full");
            let new_idx = self.nodes.len() as u32;
            self.nodes.push(KdNode::new(point, axis.next(), idx as u32));
            let parent = &mut self.nodes[idx];
            if go_left {
                parent.left = new_idx;
            } else {
                parent.right = new_idx;
            }
            return true;
        }
    }

    /// Inserts `count` uniformly random points from the tree's extent.
    ///
    /// Returns how many were kept; ties are practically impossible but still dropped.
    pub fn random_points(&mut self, count: usize) -> usize {
        self.random_points_seeded(count, get_seed())
    }

    pub fn random_points_seeded(&mut self, count: usize, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        let [w, h, d] = self.extent.size();
        let min = self.extent.min;
        let mut inserted = 0;
        for _ in 0..count {
            let x = min[0] + rng.r#gen::<f64>() * w;
            let y = min[1] + rng.r#gen::<f64>() * h;
            let z = min[2] + rng.r#gen::<f64>() * d;
            if self.insert([x, y, z]) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Inorder ranks and depths for the current shape of the tree.
    pub fn layout(&self) -> Layout {
        Layout::compute(&self.nodes, self.root_link())
    }

    /// Points in left-self-right order.
    pub fn inorder(&self) -> Vec<Point> {
        self.layout().order().map(|i| self.nodes[i].point).collect()
    }

    /// Looks up an exact point, recording every node on the way down.
    ///
    /// The descent follows a single path: left when the target is strictly
    /// smaller on a node's axis, right when strictly larger, and stops on a tie
    /// or a missing child. An empty tree reports not found with an empty path.
    pub fn find(&self, target: Point) -> Result<Lookup, KdTreeError> {
        check_finite(&target)?;
        Ok(self.find_with(&self.layout(), target))
    }

    fn find_with(&self, layout: &Layout, target: Point) -> Lookup {
        let mut lookup = Lookup::default();

        let mut idx = self.root_link();
        while idx != NONE {
            let node = &self.nodes[idx as usize];
            trace!("find {:?}: visiting {:?}", target, node.point);
            let _ = lookup.path.insert(
                layout.coord(idx as usize),
                PathStep {
                    point: node.point,
                    distance: distance(&node.point, &target),
                },
            );
            if node.point == target {
                lookup.found = true;
            }

            let axis = node.axis.index();
            idx = if target[axis] < node.point[axis] {
                node.left
            } else if target[axis] > node.point[axis] {
                node.right
            } else {
                NONE
            };
        }

        debug!("find {:?}: found={} after {} nodes", target, lookup.found, lookup.path.len());
        lookup
    }

    /// Collects the tree points within `radius` of `center` along with the
    /// full traversal trace.
    ///
    /// A subtree on the far side of a splitting plane is visited only when the
    /// sphere reaches across that plane. The center itself never counts as a
    /// neighbor, but does show up as a hit in the membership trace.
    pub fn find_sphere_neighbors(&self, center: Point, radius: f64) -> Result<SphereQuery, KdTreeError> {
        check_finite(&center)?;
        if !(radius >= 0.0) {
            return Err(KdTreeError::NegativeRadius(radius));
        }

        let layout = self.layout();
        let center_found = self.find_with(&layout, center).found;
        let mut query = SphereQuery::empty(center_found);
        if self.nodes.is_empty() {
            return Ok(query);
        }

        // Popping the near child before the far one reproduces recursive visitation order.
        let mut stack = vec![0u32];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            let coord = layout.coord(idx as usize);
            let dist = distance(&node.point, &center);
            trace!("sphere {:?}: visiting {:?} at {}", center, node.point, dist);

            query.trace.push(TraceStep { coord, point: node.point });
            if dist <= radius {
                query.membership.push(Some(coord));
                if node.point != center {
                    query.neighbors.push(node.point);
                }
            } else {
                query.membership.push(None);
            }

            let axis = node.axis.index();
            let diff = center[axis] - node.point[axis];
            let (near, far) = if diff < 0.0 { (node.left, node.right) } else { (node.right, node.left) };
            if far != NONE && diff.abs() <= radius {
                stack.push(far);
            }
            if near != NONE {
                stack.push(near);
            }
        }

        query.neighbors.sort_by(cmp_points);
        debug!(
            "sphere {:?} r={}: {} neighbors, {} of {} nodes visited",
            center,
            radius,
            query.neighbors.len(),
            query.trace.len(),
            self.nodes.len()
        );
        Ok(query)
    }

    /// Runs independent lookups in parallel.
    pub fn find_batch(&self, targets: &[Point]) -> Vec<Result<Lookup, KdTreeError>> {
        targets.par_iter().map(|&t| self.find(t)).collect()
    }

    /// Runs independent sphere queries in parallel, one per `(center, radius)`.
    pub fn sphere_batch(&self, queries: &[(Point, f64)]) -> Vec<Result<SphereQuery, KdTreeError>> {
        queries
            .par_iter()
            .map(|&(center, radius)| self.find_sphere_neighbors(center, radius))
            .collect()
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rand::thread_rng().r#gen()
    }
}

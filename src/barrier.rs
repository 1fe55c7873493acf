use crate::bounds::BoundingBox;
use crate::kdtree::{KdTree, NONE};
use crate::point::{Axis, Point};

/// The splitting plane of a node, clipped to the region its ancestors leave open.
///
/// `bounds` is flat along `axis`: `min` and `max` both equal the node's
/// coordinate there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barrier {
    pub point: Point,
    pub axis: Axis,
    pub bounds: BoundingBox<3>,
}

impl Barrier {
    /// The four corners of the rectangle, walking around its edge.
    pub fn corners(&self) -> [Point; 4] {
        let a = self.axis.index();
        let u = (a + 1) % 3;
        let v = (a + 2) % 3;
        let (min, max) = (self.bounds.min, self.bounds.max);
        let corner = |cu: f64, cv: f64| {
            let mut p = [0.0; 3];
            p[a] = self.point[a];
            p[u] = cu;
            p[v] = cv;
            p
        };
        [
            corner(min[u], min[v]),
            corner(max[u], min[v]),
            corner(max[u], max[v]),
            corner(min[u], max[v]),
        ]
    }
}

impl KdTree {
    /// Splitting planes for every node, in preorder.
    ///
    /// Each plane starts out spanning the tree's extent and is narrowed by the
    /// parent on the parent's axis, and for nodes two levels or more down, by
    /// the nearest ancestor on the remaining axis.
    pub fn barriers(&self) -> Vec<Barrier> {
        let mut barriers = Vec::with_capacity(self.nodes.len());
        let mut stack = if self.nodes.is_empty() { Vec::new() } else { vec![0u32] };

        while let Some(idx) = stack.pop() {
            barriers.push(self.barrier(idx));
            let node = &self.nodes[idx as usize];
            if node.right != NONE {
                stack.push(node.right);
            }
            if node.left != NONE {
                stack.push(node.left);
            }
        }

        barriers
    }

    fn barrier(&self, idx: u32) -> Barrier {
        let node = &self.nodes[idx as usize];
        let mut min = self.extent.min;
        let mut max = self.extent.max;

        if node.parent != NONE {
            let parent = &self.nodes[node.parent as usize];
            let is_left = parent.left == idx;
            let p = parent.axis.index();
            if is_left {
                max[p] = parent.point[p];
            } else {
                min[p] = parent.point[p];
            }

            // Below a Y or Z parent the axis before it is pinned by the ancestor
            // that split on it.
            let cross = match parent.axis {
                Axis::X => None,
                Axis::Y => Some(Axis::X),
                Axis::Z => Some(Axis::Y),
            };
            if let Some(cross) = cross {
                let ancestor = self.nearest_below(node.parent, cross);
                let c = cross.index();
                if ancestor[c] < node.point[c] {
                    min[c] = ancestor[c];
                } else {
                    max[c] = ancestor[c];
                }
            }
        }

        let a = node.axis.index();
        min[a] = node.point[a];
        max[a] = node.point[a];

        Barrier {
            point: node.point,
            axis: node.axis,
            bounds: BoundingBox::new(min, max),
        }
    }

    /// Climbs from `start` while the next parent splits on `axis`, returning the
    /// point reached.
    fn nearest_below(&self, start: u32, axis: Axis) -> Point {
        let mut current = &self.nodes[start as usize];
        while current.parent != NONE {
            let parent = &self.nodes[current.parent as usize];
            if parent.axis != axis {
                break;
            }
            current = parent;
        }
        current.point
    }
}

use serde::{Deserialize, Serialize};

use crate::error::KdTreeError;
use crate::kdtree::{KdTree, NONE};
use crate::layout::Layout;
use crate::point::Axis;

/// A recursive copy of a node and its subtrees, as read by the browser viewer.
///
/// `depth` uses the diagram convention: 0 at the root, -1 for its children and so on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub inorder_pos: usize,
    pub depth: i64,
    pub level: Axis,
    pub left: Option<Box<NodeSnapshot>>,
    pub right: Option<Box<NodeSnapshot>>,
}

impl NodeSnapshot {
    /// Number of nodes in this snapshot, itself included.
    pub fn count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.count()) + self.right.as_ref().map_or(0, |n| n.count())
    }
}

/// Top-level document written by [`KdTree::to_json`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeExport {
    pub tree_structure: Option<NodeSnapshot>,
}

impl KdTree {
    /// Snapshot of the whole tree with freshly computed ranks and depths.
    pub fn snapshot(&self) -> Option<NodeSnapshot> {
        if self.nodes.is_empty() {
            return None;
        }
        let layout = self.layout();
        Some(self.snapshot_node(0, &layout))
    }

    fn snapshot_node(&self, idx: u32, layout: &Layout) -> NodeSnapshot {
        let node = &self.nodes[idx as usize];
        let coord = layout.coord(idx as usize);
        let child = |link: u32| (link != NONE).then(|| Box::new(self.snapshot_node(link, layout)));
        NodeSnapshot {
            x: node.point[0],
            y: node.point[1],
            z: node.point[2],
            inorder_pos: coord.rank,
            depth: -(coord.depth as i64),
            level: node.axis,
            left: child(node.left),
            right: child(node.right),
        }
    }

    /// Serializes the tree as `{"tree_structure": ...}`.
    pub fn to_json(&self) -> Result<String, KdTreeError> {
        let export = TreeExport { tree_structure: self.snapshot() };
        Ok(serde_json::to_string(&export)?)
    }
}

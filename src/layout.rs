use crate::kdtree::{KdNode, NONE};

/// Position of a node in the 2D tree diagram.
///
/// `rank` is the inorder position of the node and `depth` its distance from
/// the root. Both are derived from the tree shape and are recomputed for every
/// query, so they never take part in node identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayCoord {
    pub rank: usize,
    pub depth: usize,
}

impl DisplayCoord {
    /// Horizontal diagram coordinate.
    pub fn x(&self) -> f64 {
        self.rank as f64
    }

    /// Vertical diagram coordinate; the root sits at 0 and children grow downwards.
    pub fn y(&self) -> f64 {
        -(self.depth as f64)
    }
}

/// Inorder ranks and depths for every node of a tree, indexed like the node arena.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    ranks: Vec<usize>,
    depths: Vec<usize>,
    order: Vec<u32>,
}

impl Layout {
    /// Walks the tree left-self-right from `root`, assigning consecutive ranks from 0.
    pub(crate) fn compute(nodes: &[KdNode], root: u32) -> Self {
        let mut layout = Layout {
            ranks: vec![0; nodes.len()],
            depths: vec![0; nodes.len()],
            order: Vec::with_capacity(nodes.len()),
        };

        // Explicit stack so that degenerate (list-like) trees cannot exhaust the call stack.
        let mut stack: Vec<(u32, usize)> = Vec::new();
        let mut current = root;
        let mut depth = 0;
        loop {
            while current != NONE {
                stack.push((current, depth));
                current = nodes[current as usize].left;
                depth += 1;
            }
            let Some((idx, d)) = stack.pop() else {
                break;
            };
            layout.ranks[idx as usize] = layout.order.len();
            layout.depths[idx as usize] = d;
            layout.order.push(idx);
            current = nodes[idx as usize].right;
            depth = d + 1;
        }

        layout
    }

    /// Display coordinate of the node at arena index `node`.
    pub fn coord(&self, node: usize) -> DisplayCoord {
        DisplayCoord {
            rank: self.ranks[node],
            depth: self.depths[node],
        }
    }

    /// Arena indices in inorder.
    pub fn order(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().map(|&i| i as usize)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

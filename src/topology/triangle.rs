//! Triangle elements with their intersection flag.

use std::fmt;

use crate::topology::node::{Edge, NodeId};

/// Stable handle of a triangle inside a [`TriMesh`](crate::topology::mesh::TriMesh).
///
/// Handles are positions in load order, so they double as the line number of
/// the triangle's flag in the output file (zero based).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(usize);

impl TriangleId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        TriangleId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tri#{}", self.0 + 1)
    }
}

/// A triangle whose nodes are sorted `a < b < c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triangle {
    nodes: [NodeId; 3],
    on_intersection: bool,
}

impl Triangle {
    /// Sort the three nodes; `None` if any node repeats.
    pub fn try_new(mut nodes: [NodeId; 3]) -> Option<Self> {
        nodes.sort_unstable();
        if nodes[0] == nodes[1] || nodes[1] == nodes[2] {
            return None;
        }
        Some(Triangle {
            nodes,
            on_intersection: false,
        })
    }

    /// Nodes in ascending order.
    #[inline]
    pub fn nodes(&self) -> [NodeId; 3] {
        self.nodes
    }

    /// The three owned edges `(a,b)`, `(a,c)`, `(b,c)`.
    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.nodes;
        [Edge::new(a, b), Edge::new(a, c), Edge::new(b, c)]
    }

    #[inline]
    pub fn is_on_intersection(&self) -> bool {
        self.on_intersection
    }

    /// Flag the triangle as touching the intersection.
    ///
    /// Returns `true` only on the false → true transition.
    #[inline]
    pub fn mark_on_intersection(&mut self) -> bool {
        !std::mem::replace(&mut self.on_intersection, true)
    }

    pub(crate) fn clear_flag(&mut self) {
        self.on_intersection = false;
    }
}

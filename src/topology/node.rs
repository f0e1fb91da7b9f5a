//! Node handles and the edge types built from them.
//!
//! `NodeId` is used for both numbering spaces a run deals with: the
//! intersection-local ids read from the intersection file and the global ids
//! of the mesh. The two spaces only meet through an [`IdMap`].
//!
//! [`IdMap`]: crate::algs::remap::IdMap

use std::fmt;

/// A node number as it appears in an input file.
///
/// Ids need not start at zero or one; the mesh's smallest id acts as the
/// offset of the edge index.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u64);

impl NodeId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        NodeId(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.0).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        NodeId(raw)
    }
}

/// An undirected edge stored with its endpoints ordered, `lo <= hi`.
///
/// Two edges compare equal iff their unordered endpoint pairs match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    lo: NodeId,
    hi: NodeId,
}

impl Edge {
    /// Normalize `(a, b)` so the smaller id comes first.
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Edge { lo: a, hi: b }
        } else {
            Edge { lo: b, hi: a }
        }
    }

    /// Smaller endpoint; the edge index is keyed on it.
    #[inline]
    pub fn lo(self) -> NodeId {
        self.lo
    }

    #[inline]
    pub fn hi(self) -> NodeId {
        self.hi
    }

    /// True if both endpoints are the same node. Such an edge never exists in
    /// a triangle mesh.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.lo == self.hi
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// A required node-to-node connection, endpoints kept in file order.
///
/// Connections start out in intersection-local numbering and are rewritten to
/// global numbering by [`IdMap::remap`](crate::algs::remap::IdMap::remap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    pub a: NodeId,
    pub b: NodeId,
}

impl Connection {
    pub fn new(a: impl Into<NodeId>, b: impl Into<NodeId>) -> Self {
        Connection {
            a: a.into(),
            b: b.into(),
        }
    }

    /// The normalized edge this connection requires.
    #[inline]
    pub fn edge(self) -> Edge {
        Edge::new(self.a, self.b)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

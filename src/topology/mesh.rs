//! `TriMesh`: arena of triangles in load order.
//!
//! Triangles are addressed by [`TriangleId`] (their load position), which is
//! what the edge index stores instead of references. The mesh also records the
//! [`NodeSpan`] of every node id its triangles reference; that span sizes the
//! edge index.

use crate::check_error::CheckError;
use crate::debug_invariants::DebugInvariants;
use crate::topology::bounds::NodeSpan;
use crate::topology::node::NodeId;
use crate::topology::triangle::{Triangle, TriangleId};

#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    triangles: Vec<Triangle>,
    span: Option<NodeSpan>,
}

impl TriMesh {
    /// Build a mesh from triangles in load order.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let span = NodeSpan::covering(triangles.iter().flat_map(|t| t.nodes()));
        TriMesh { triangles, span }
    }

    /// Build a mesh from raw node triples, sorting each.
    ///
    /// Returns `None` if any triple repeats a node.
    pub fn from_triples(triples: impl IntoIterator<Item = [NodeId; 3]>) -> Option<Self> {
        let triangles = triples
            .into_iter()
            .map(Triangle::try_new)
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(triangles))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Span of node ids referenced by triangles; `None` for an empty mesh.
    #[inline]
    pub fn span(&self) -> Option<NodeSpan> {
        self.span
    }

    #[inline]
    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.index())
    }

    /// Triangles with their handles, in load order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TriangleId, &Triangle)> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .map(|(i, t)| (TriangleId::new(i), t))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Flag triangle `id`; `Ok(true)` if it was not flagged before.
    pub fn mark(&mut self, id: TriangleId) -> Result<bool, CheckError> {
        let count = self.triangles.len();
        self.triangles
            .get_mut(id.index())
            .map(Triangle::mark_on_intersection)
            .ok_or_else(|| {
                CheckError::InvariantViolation(format!(
                    "triangle handle {id} out of range for mesh of {count} triangles"
                ))
            })
    }

    /// Intersection flags in load order.
    pub fn flags(&self) -> Vec<bool> {
        self.triangles.iter().map(Triangle::is_on_intersection).collect()
    }

    pub fn flagged_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_on_intersection()).count()
    }

    /// Clear every flag so the same mesh can be verified again from scratch.
    pub fn reset_flags(&mut self) {
        self.triangles.iter_mut().for_each(Triangle::clear_flag);
    }
}

impl DebugInvariants for TriMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TriMesh");
    }

    fn validate_invariants(&self) -> Result<(), CheckError> {
        let Some(span) = self.span else {
            if self.triangles.is_empty() {
                return Ok(());
            }
            return Err(CheckError::InvariantViolation(
                "non-empty mesh without a node span".into(),
            ));
        };
        for (id, tri) in self.iter() {
            let [a, b, c] = tri.nodes();
            if !(a < b && b < c) {
                return Err(CheckError::InvariantViolation(format!(
                    "{id} nodes not strictly ascending: {a} {b} {c}"
                )));
            }
            if !span.contains(a) || !span.contains(c) {
                return Err(CheckError::InvariantViolation(format!(
                    "{id} has nodes outside mesh span {span}"
                )));
            }
        }
        Ok(())
    }
}

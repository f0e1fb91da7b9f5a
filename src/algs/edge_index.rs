//! Edge existence index over a triangle mesh.
//!
//! The index is a sparse upper-triangular adjacency table: every triangle
//! edge is stored once per owning triangle, in the bucket of its smaller
//! endpoint, as an `(hi, triangle)` entry. An interior edge shared by two
//! triangles therefore shows up as two entries with the same `hi` in one
//! bucket, a boundary edge as a single entry.
//!
//! Determinism:
//! - Entries within a bucket are in triangle load order, and for each
//!   triangle `(a,b,c)` in the order `(a,b)`, `(a,c)`, `(b,c)`. The parallel
//!   builder produces the same layout.

use crate::check_error::CheckError;
use crate::debug_invariants::DebugInvariants;
use crate::topology::bounds::{BoundedBuckets, NodeSpan, OutOfSpan, SpanTooLarge};
use crate::topology::mesh::TriMesh;
use crate::topology::node::{Edge, NodeId};
use crate::topology::triangle::{Triangle, TriangleId};

/// One indexed edge: the larger endpoint and the triangle that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeEntry {
    pub hi: NodeId,
    pub triangle: TriangleId,
}

/// Size figures for logging.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeIndexStats {
    /// Number of buckets, `max_id - min_id + 1`.
    pub buckets: usize,
    /// Buckets holding at least one entry.
    pub occupied: usize,
    /// Total entries, three per triangle.
    pub entries: usize,
    /// Length of the longest bucket.
    pub max_bucket: usize,
}

#[derive(Debug, Clone)]
pub struct EdgeIndex {
    // None for a mesh with no triangles.
    buckets: Option<BoundedBuckets<EdgeEntry>>,
    triangle_count: usize,
}

/// Iterator over the triangles owning one queried edge, in bucket order.
#[derive(Debug, Clone)]
pub struct EdgeMatches<'a> {
    hi: NodeId,
    rest: std::slice::Iter<'a, EdgeEntry>,
}

impl Iterator for EdgeMatches<'_> {
    type Item = TriangleId;

    fn next(&mut self) -> Option<TriangleId> {
        let hi = self.hi;
        self.rest.find(|e| e.hi == hi).map(|e| e.triangle)
    }
}

#[inline]
fn triangle_entries(id: TriangleId, tri: &Triangle) -> [(NodeId, EdgeEntry); 3] {
    let [a, b, c] = tri.nodes();
    let entry = |hi| EdgeEntry { hi, triangle: id };
    [(a, entry(b)), (a, entry(c)), (b, entry(c))]
}

fn span_error(err: OutOfSpan) -> CheckError {
    CheckError::InvariantViolation(format!("mesh span does not cover its own triangles: {err}"))
}

fn table_for(span: NodeSpan) -> Result<BoundedBuckets<EdgeEntry>, CheckError> {
    BoundedBuckets::new(span).map_err(|SpanTooLarge { span }| CheckError::SpanTooLarge { span })
}

impl EdgeIndex {
    /// Index every edge of every triangle in `mesh`.
    pub fn build(mesh: &TriMesh) -> Result<Self, CheckError> {
        let Some(span) = mesh.span() else {
            return Ok(Self::empty());
        };
        let mut buckets = table_for(span)?;
        for (id, tri) in mesh.iter() {
            log::trace!("indexing {id} {:?}", tri.nodes());
            for (lo, entry) in triangle_entries(id, tri) {
                buckets.push(lo, entry).map_err(span_error)?;
            }
        }
        Ok(Self::finish(buckets, mesh.len()))
    }

    /// Parallel variant of [`build`](Self::build) with an identical layout.
    ///
    /// Per-triangle entries are computed in parallel and collected in load
    /// order; bucket sizes are counted up front so each bucket is allocated
    /// once before the ordered fill.
    #[cfg(feature = "rayon")]
    pub fn build_par(mesh: &TriMesh) -> Result<Self, CheckError> {
        use rayon::prelude::*;

        let Some(span) = mesh.span() else {
            return Ok(Self::empty());
        };
        let entries: Vec<[(NodeId, EdgeEntry); 3]> = mesh
            .triangles()
            .par_iter()
            .enumerate()
            .map(|(i, tri)| triangle_entries(TriangleId::new(i), tri))
            .collect();

        let mut buckets = table_for(span)?;
        let mut counts = vec![0usize; buckets.bucket_count()];
        for (lo, _) in entries.iter().flatten() {
            let at = span.offset(*lo).ok_or_else(|| {
                span_error(OutOfSpan {
                    node: *lo,
                    span,
                })
            })?;
            counts[at] += 1;
        }
        for (at, count) in counts.into_iter().enumerate() {
            if count > 0 {
                let node = NodeId::new(span.min().get() + at as u64);
                buckets.reserve(node, count).map_err(span_error)?;
            }
        }
        for (lo, entry) in entries.into_iter().flatten() {
            buckets.push(lo, entry).map_err(span_error)?;
        }
        Ok(Self::finish(buckets, mesh.len()))
    }

    fn empty() -> Self {
        EdgeIndex {
            buckets: None,
            triangle_count: 0,
        }
    }

    fn finish(buckets: BoundedBuckets<EdgeEntry>, triangle_count: usize) -> Self {
        let index = EdgeIndex {
            buckets: Some(buckets),
            triangle_count,
        };
        crate::debug_invariants!(index.validate_invariants(), "EdgeIndex::build");
        index
    }

    /// Node span the index covers; `None` if the mesh was empty.
    pub fn span(&self) -> Option<NodeSpan> {
        self.buckets.as_ref().map(BoundedBuckets::span)
    }

    /// Raw entries stored under `lo`.
    pub fn bucket(&self, lo: NodeId) -> Option<Result<&[EdgeEntry], OutOfSpan>> {
        self.buckets.as_ref().map(|b| b.get(lo))
    }

    /// Triangles owning `edge`.
    ///
    /// Fails with [`CheckError::OutOfRangeEdge`] when the smaller endpoint is
    /// not in the mesh span, or [`CheckError::EmptyMesh`] when there are no
    /// triangles at all. An empty iterator means the node exists but the
    /// edge does not.
    pub fn query(&self, edge: Edge) -> Result<EdgeMatches<'_>, CheckError> {
        let buckets = self
            .buckets
            .as_ref()
            .ok_or(CheckError::EmptyMesh { edge })?;
        let bucket = buckets
            .get(edge.lo())
            .map_err(|e| CheckError::OutOfRangeEdge { edge, span: e.span })?;
        Ok(EdgeMatches {
            hi: edge.hi(),
            rest: bucket.iter(),
        })
    }

    pub fn stats(&self) -> EdgeIndexStats {
        let Some(buckets) = &self.buckets else {
            return EdgeIndexStats::default();
        };
        let mut stats = EdgeIndexStats {
            buckets: buckets.bucket_count(),
            ..EdgeIndexStats::default()
        };
        for (_, bucket) in buckets.iter() {
            if !bucket.is_empty() {
                stats.occupied += 1;
            }
            stats.entries += bucket.len();
            stats.max_bucket = stats.max_bucket.max(bucket.len());
        }
        stats
    }
}

impl DebugInvariants for EdgeIndex {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "EdgeIndex");
    }

    fn validate_invariants(&self) -> Result<(), CheckError> {
        let Some(buckets) = &self.buckets else {
            return Ok(());
        };
        let span = buckets.span();
        for (lo, bucket) in buckets.iter() {
            for e in bucket {
                if e.hi <= lo || !span.contains(e.hi) {
                    return Err(CheckError::InvariantViolation(format!(
                        "entry {} of {} filed under node {lo}",
                        e.hi, e.triangle
                    )));
                }
                if e.triangle.index() >= self.triangle_count {
                    return Err(CheckError::InvariantViolation(format!(
                        "entry refers to {} but only {} triangles were indexed",
                        e.triangle, self.triangle_count
                    )));
                }
            }
        }
        let entries = buckets.entry_count();
        if entries != 3 * self.triangle_count {
            return Err(CheckError::InvariantViolation(format!(
                "{entries} entries for {} triangles",
                self.triangle_count
            )));
        }
        Ok(())
    }
}

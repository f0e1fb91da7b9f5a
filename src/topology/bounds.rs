//! Node id spans and bucket tables addressed by node id.
//!
//! A [`BoundedBuckets`] table holds one bucket per node id in a [`NodeSpan`],
//! stored densely at offset `id - span.min()`. Every lookup goes through the
//! span check, so an id outside the mesh is reported as [`OutOfSpan`] instead
//! of indexing past the table.

use std::fmt;

use thiserror::Error;

use crate::topology::node::NodeId;

/// Inclusive range `[min, max]` of node ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeSpan {
    min: NodeId,
    max: NodeId,
}

impl NodeSpan {
    /// Span covering `a..=b` whichever order they are given in.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        NodeSpan {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest span covering every id, or `None` for an empty iterator.
    pub fn covering(ids: impl IntoIterator<Item = NodeId>) -> Option<Self> {
        ids.into_iter().fold(None, |span, id| match span {
            None => Some(NodeSpan { min: id, max: id }),
            Some(s) => Some(s.including(id)),
        })
    }

    /// Grow the span so it also covers `id`.
    #[must_use]
    pub fn including(self, id: NodeId) -> Self {
        NodeSpan {
            min: self.min.min(id),
            max: self.max.max(id),
        }
    }

    #[inline]
    pub fn min(self) -> NodeId {
        self.min
    }

    #[inline]
    pub fn max(self) -> NodeId {
        self.max
    }

    /// Number of ids in the span, `max - min + 1`, or `None` if that does
    /// not fit in a `usize`.
    #[inline]
    pub fn len(self) -> Option<usize> {
        usize::try_from(self.max.get() - self.min.get())
            .ok()?
            .checked_add(1)
    }

    #[inline]
    pub fn contains(self, id: NodeId) -> bool {
        self.min <= id && id <= self.max
    }

    /// Dense offset of `id`, if it lies in the span.
    #[inline]
    pub fn offset(self, id: NodeId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        usize::try_from(id.get() - self.min.get()).ok()
    }
}

impl fmt::Display for NodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A node id fell outside the span of a [`BoundedBuckets`] table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("node {node} is outside span {span}")]
pub struct OutOfSpan {
    pub node: NodeId,
    pub span: NodeSpan,
}

/// A span holds more ids than a bucket table can be allocated for.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("node span {span} is too wide to index")]
pub struct SpanTooLarge {
    pub span: NodeSpan,
}

/// One ordered bucket per node id of a span.
#[derive(Debug, Clone)]
pub struct BoundedBuckets<T> {
    span: NodeSpan,
    buckets: Vec<Vec<T>>,
}

impl<T> BoundedBuckets<T> {
    /// Allocate an empty bucket for every id in `span`.
    pub fn new(span: NodeSpan) -> Result<Self, SpanTooLarge> {
        let len = span.len().ok_or(SpanTooLarge { span })?;
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(len)
            .map_err(|_| SpanTooLarge { span })?;
        buckets.resize_with(len, Vec::new);
        Ok(BoundedBuckets { span, buckets })
    }

    #[inline]
    pub fn span(&self) -> NodeSpan {
        self.span
    }

    #[inline]
    fn offset(&self, node: NodeId) -> Result<usize, OutOfSpan> {
        self.span.offset(node).ok_or(OutOfSpan {
            node,
            span: self.span,
        })
    }

    /// Append `value` to the bucket of `node`, keeping insertion order.
    pub fn push(&mut self, node: NodeId, value: T) -> Result<(), OutOfSpan> {
        let at = self.offset(node)?;
        self.buckets[at].push(value);
        Ok(())
    }

    /// Entries of `node`'s bucket in insertion order.
    pub fn get(&self, node: NodeId) -> Result<&[T], OutOfSpan> {
        let at = self.offset(node)?;
        Ok(&self.buckets[at])
    }

    /// Reserve room for `additional` more entries in `node`'s bucket.
    pub fn reserve(&mut self, node: NodeId, additional: usize) -> Result<(), OutOfSpan> {
        let at = self.offset(node)?;
        self.buckets[at].reserve_exact(additional);
        Ok(())
    }

    /// Iterate every bucket with the node id it belongs to.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[T])> + '_ {
        let base = self.span.min().get();
        self.buckets
            .iter()
            .enumerate()
            .map(move |(i, b)| (NodeId::new(base + i as u64), b.as_slice()))
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all buckets.
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    #[test]
    fn span_with_offset() {
        let span = NodeSpan::covering([n(12), n(10), n(15)]).unwrap();
        assert_eq!(span.min(), n(10));
        assert_eq!(span.max(), n(15));
        assert_eq!(span.len(), Some(6));
        assert_eq!(span.offset(n(10)), Some(0));
        assert_eq!(span.offset(n(15)), Some(5));
        assert_eq!(span.offset(n(9)), None);
        assert_eq!(span.offset(n(16)), None);
        assert!(NodeSpan::covering(std::iter::empty()).is_none());
    }

    #[test]
    fn buckets_reject_ids_outside_span() {
        let mut b = BoundedBuckets::new(NodeSpan::new(n(3), n(5))).unwrap();
        b.push(n(3), 'a').unwrap();
        b.push(n(3), 'b').unwrap();
        b.push(n(5), 'c').unwrap();
        assert_eq!(b.get(n(3)).unwrap(), &['a', 'b']);
        assert_eq!(b.get(n(4)).unwrap(), &[] as &[char]);
        let err = b.push(n(2), 'x').unwrap_err();
        assert_eq!(err.node, n(2));
        assert!(b.get(n(6)).is_err());
        assert_eq!(b.entry_count(), 3);
        let ids: Vec<_> = b.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn spans_too_wide_for_a_table_are_rejected() {
        let full = NodeSpan::new(n(0), n(u64::MAX));
        assert_eq!(full.len(), None);
        assert_eq!(
            BoundedBuckets::<u8>::new(full).unwrap_err(),
            SpanTooLarge { span: full }
        );
        let huge = NodeSpan::new(n(0), n(u64::MAX - 1));
        assert!(BoundedBuckets::<u8>::new(huge).is_err());
        assert_eq!(full.offset(n(7)), Some(7));
    }
}

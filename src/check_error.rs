//! CheckError: unified error type for fracture-intersect public APIs
//!
//! Every stage of a run (record loading, id remapping, edge index queries,
//! verification, flag emission) reports failures through this one enum so the
//! binary can map any of them onto a process exit code.

use std::fmt;
use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

use crate::topology::bounds::NodeSpan;
use crate::topology::node::{Connection, Edge, NodeId};

/// Which of the expected triangle entries for a required edge was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingKind {
    /// No triangle owns the edge at all.
    FirstEntry,
    /// Exactly one triangle owns the edge but a shared edge was required.
    SecondEntry,
}

/// One required connection that could not be fully verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingConnection {
    pub edge: Edge,
    pub kind: MissingKind,
}

impl fmt::Display for MissingConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MissingKind::FirstEntry => {
                write!(f, "did not find first element for connection {}", self.edge)
            }
            MissingKind::SecondEntry => {
                write!(f, "did not find second element for connection {}", self.edge)
            }
        }
    }
}

/// Unified error type for fracture-intersect operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A record file could not be parsed into fixed-arity records.
    #[error("malformed input in {source_name} at line {line}: {reason}")]
    MalformedInput {
        source_name: String,
        line: usize,
        reason: String,
    },
    /// The id map has no global id for a local id used by a connection.
    #[error("local node {local} of connection {connection} has no global id in the id map")]
    UnmappedLocalId { local: NodeId, connection: Connection },
    /// The smaller endpoint of a required edge is not a node of the mesh.
    #[error("edge {edge} lies outside the mesh node span {span}; node {} is not in the mesh", .edge.lo())]
    OutOfRangeEdge { edge: Edge, span: NodeSpan },
    /// The mesh node ids range too widely for a bucket table.
    #[error("mesh node span {span} is too wide to index")]
    SpanTooLarge { span: NodeSpan },
    /// A required edge was queried against a mesh with no triangles.
    #[error("edge {edge} cannot exist: the mesh contains no triangles")]
    EmptyMesh { edge: Edge },
    /// A single missing connection (fail-fast mode).
    #[error("{0}")]
    MissingConnection(MissingConnection),
    /// Every missing connection found in collect-all mode.
    #[error("{} required connection(s) missing from the mesh: {}", .0.len(), .0.iter().map(|m| m.edge).join(", "))]
    ConnectivityFailures(Vec<MissingConnection>),
    /// The flag file could not be created or written.
    #[error("cannot write flag file {}: {reason}", .path.display())]
    OutputWrite { path: PathBuf, reason: String },
    /// An input file could not be opened or read.
    #[error("cannot read {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },
    /// An internal structure failed its invariant check.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl CheckError {
    /// Process exit code for this failure.
    ///
    /// `1` means the mesh is readable but connectivity was lost, `2` covers
    /// structural and input failures, `3` means the flag file could not be
    /// written.
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckError::MissingConnection(_) | CheckError::ConnectivityFailures(_) => 1,
            CheckError::OutputWrite { .. } => 3,
            CheckError::MalformedInput { .. }
            | CheckError::UnmappedLocalId { .. }
            | CheckError::OutOfRangeEdge { .. }
            | CheckError::EmptyMesh { .. }
            | CheckError::SpanTooLarge { .. }
            | CheckError::Io { .. }
            | CheckError::InvariantViolation(_) => 2,
        }
    }

    /// Missing connections carried by this error, if any.
    pub fn missing(&self) -> &[MissingConnection] {
        match self {
            CheckError::MissingConnection(m) => std::slice::from_ref(m),
            CheckError::ConnectivityFailures(all) => all,
            _ => &[],
        }
    }

    pub(crate) fn malformed(source_name: &str, line: usize, reason: impl Into<String>) -> Self {
        CheckError::MalformedInput {
            source_name: source_name.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

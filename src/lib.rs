#![cfg_attr(docsrs, feature(doc_cfg))]
//! # fracture-intersect
//!
//! Checks that the node connectivity along fracture intersections survives
//! triangulation. A discrete fracture network hands the mesher a set of
//! intersection line segments; after meshing, every one of those segments
//! must still be an edge of some triangle. This crate verifies that and
//! emits a per-triangle flag marking the elements that lie on an
//! intersection.
//!
//! ## Pipeline
//! 1. Read the intersection `line` elements (intersection-local numbering),
//!    the local → global id map, and the mesh `tri` elements
//!    ([`io`]).
//! 2. Rewrite the required connections into global numbering
//!    ([`algs::remap`]).
//! 3. Index every triangle edge under its smaller endpoint
//!    ([`algs::edge_index`]).
//! 4. Look up each required edge, flagging the triangles that own it
//!    ([`algs::verify`]).
//! 5. Write one `0`/`1` flag per triangle in load order ([`io::flags`]).
//!
//! [`pipeline::run`] does all of this from a [`config::RunConfig`];
//! [`pipeline::verify_records`] runs steps 2–4 on records already in memory.
//!
//! ## Determinism
//!
//! Connections are checked in input order and edge index buckets keep
//! triangle load order, so diagnostics are reproducible. The optional
//! `rayon` feature parallelizes index construction without changing the
//! bucket layout.

pub mod algs;
pub mod check_error;
pub mod config;
pub mod debug_invariants;
pub mod io;
pub mod pipeline;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::edge_index::{EdgeIndex, EdgeIndexStats};
    pub use crate::algs::remap::{IdMap, remap_connections};
    pub use crate::algs::verify::{
        FailurePolicy, SharedEdgePolicy, VerifyOptions, VerifyReport, verify_connections,
    };
    pub use crate::check_error::{CheckError, MissingConnection, MissingKind};
    pub use crate::config::{RunConfig, Verbosity};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::pipeline::{RunSummary, run, verify_records};
    pub use crate::topology::bounds::NodeSpan;
    pub use crate::topology::mesh::TriMesh;
    pub use crate::topology::node::{Connection, Edge, NodeId};
    pub use crate::topology::triangle::{Triangle, TriangleId};
}

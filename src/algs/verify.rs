//! Connectivity verification of required edges against an [`EdgeIndex`].
//!
//! Each required connection is normalized to `(lo, hi)` and looked up in the
//! index. The first owning triangle found is flagged, then the bucket scan
//! continues for further owners, which are flagged too. How a missing edge is
//! handled is controlled by [`VerifyOptions`].

use crate::algs::edge_index::EdgeIndex;
use crate::check_error::{CheckError, MissingConnection, MissingKind};
use crate::topology::mesh::TriMesh;
use crate::topology::node::Connection;

/// What to do when a required connection is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first missing connection.
    #[default]
    FailFast,
    /// Check every connection, then report all missing ones together.
    CollectAll,
}

/// How many owning triangles a found edge needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SharedEdgePolicy {
    /// One owner suffices; a second one is flagged when present.
    #[default]
    AllowBoundary,
    /// Every required edge must be interior and owned by two triangles.
    RequireShared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyOptions {
    pub failure: FailurePolicy,
    pub shared_edges: SharedEdgePolicy,
}

/// Outcome of a verification pass that was not aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Connections examined, in input order.
    pub connections_checked: usize,
    /// Triangles whose flag went from unset to set during this pass.
    pub marks_applied: usize,
    /// Triangles flagged after the pass, including ones flagged earlier.
    pub triangles_flagged: usize,
    /// Missing connections recorded under [`FailurePolicy::CollectAll`].
    pub missing: Vec<MissingConnection>,
}

impl VerifyReport {
    /// True if every required connection was found.
    pub fn is_verified(&self) -> bool {
        self.missing.is_empty()
    }

    /// Turn recorded misses into [`CheckError::ConnectivityFailures`].
    pub fn into_result(self) -> Result<Self, CheckError> {
        if self.is_verified() {
            Ok(self)
        } else {
            Err(CheckError::ConnectivityFailures(self.missing))
        }
    }
}

/// Verify every connection (already in global numbering) against `index`,
/// flagging owning triangles of `mesh`.
///
/// Out-of-range edges abort regardless of policy. Missing edges abort under
/// [`FailurePolicy::FailFast`] and are collected in the report otherwise.
pub fn verify_connections(
    index: &EdgeIndex,
    mesh: &mut TriMesh,
    connections: &[Connection],
    opts: VerifyOptions,
) -> Result<VerifyReport, CheckError> {
    let mut report = VerifyReport::default();

    for connection in connections {
        let edge = connection.edge();
        log::trace!("searching bucket {} for {}", edge.lo(), edge.hi());
        report.connections_checked += 1;

        let mut owners = index.query(edge)?;
        let missing_kind = match owners.next() {
            None => Some(MissingKind::FirstEntry),
            Some(first) => {
                report.marks_applied += usize::from(mesh.mark(first)?);
                let mut owner_count = 1usize;
                for other in owners {
                    report.marks_applied += usize::from(mesh.mark(other)?);
                    owner_count += 1;
                }
                if owner_count > 2 {
                    log::debug!("edge {edge} is owned by {owner_count} triangles");
                }
                (owner_count == 1 && opts.shared_edges == SharedEdgePolicy::RequireShared)
                    .then_some(MissingKind::SecondEntry)
            }
        };

        if let Some(kind) = missing_kind {
            let missing = MissingConnection { edge, kind };
            match opts.failure {
                FailurePolicy::FailFast => return Err(CheckError::MissingConnection(missing)),
                FailurePolicy::CollectAll => {
                    log::warn!("{missing}");
                    report.missing.push(missing);
                }
            }
        }
    }

    report.triangles_flagged = mesh.flagged_count();
    Ok(report)
}

//! End-to-end verification run: load → remap → index → verify → emit.

use crate::algs::edge_index::EdgeIndex;
use crate::algs::remap::{IdMap, remap_connections};
use crate::algs::verify::{VerifyOptions, VerifyReport, verify_connections};
use crate::check_error::CheckError;
use crate::config::RunConfig;
use crate::debug_invariants::DebugInvariants;
use crate::io::avs::AvsReader;
use crate::io::flags::FlagWriter;
use crate::io::id_map::IdMapReader;
use crate::io::open;
use crate::topology::mesh::TriMesh;
use crate::topology::node::Connection;

/// What a successful run checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub triangles: usize,
    pub connections: usize,
    pub report: VerifyReport,
}

fn build_index(mesh: &TriMesh) -> Result<EdgeIndex, CheckError> {
    #[cfg(feature = "rayon")]
    let index = EdgeIndex::build_par(mesh)?;
    #[cfg(not(feature = "rayon"))]
    let index = EdgeIndex::build(mesh)?;
    Ok(index)
}

/// Verify parsed records: remap `local_connections` through `id_map`, index
/// `mesh`, and flag every triangle owning a required edge.
///
/// Under [`FailurePolicy::CollectAll`](crate::algs::verify::FailurePolicy)
/// the returned report may still list missing connections.
pub fn verify_records(
    local_connections: Vec<Connection>,
    id_map: &IdMap,
    mesh: &mut TriMesh,
    opts: VerifyOptions,
) -> Result<VerifyReport, CheckError> {
    let connections = remap_connections(id_map, local_connections)?;
    for c in &connections {
        log::debug!("global connection {c}");
    }

    let index = build_index(mesh)?;
    if let Some(span) = index.span() {
        log::debug!("mesh node span {span}");
    }
    let stats = index.stats();
    log::debug!(
        "edge index: {} buckets ({} occupied), {} entries, longest bucket {}",
        stats.buckets,
        stats.occupied,
        stats.entries,
        stats.max_bucket
    );

    let report = verify_connections(&index, mesh, &connections, opts)?;
    log::info!(
        "checked {} connections, {} of {} triangles on the intersection",
        report.connections_checked,
        report.triangles_flagged,
        mesh.len()
    );
    Ok(report)
}

/// Run one verification from files.
///
/// Fail-fast runs that hit a missing connection write no flag file.
/// Collect-all runs write the flags of every verified edge before returning
/// [`CheckError::ConnectivityFailures`].
pub fn run(config: &RunConfig) -> Result<RunSummary, CheckError> {
    log::debug!("configuration: {config:?}");

    let connections = AvsReader::new(config.intersections.display().to_string())
        .read_connections(open(&config.intersections)?)?;
    log::info!(
        "{}: {} required connections",
        config.intersections.display(),
        connections.len()
    );

    let id_map =
        IdMapReader::new(config.id_map.display().to_string()).read(open(&config.id_map)?)?;

    let mut mesh =
        AvsReader::new(config.mesh.display().to_string()).read_mesh(open(&config.mesh)?)?;
    mesh.debug_assert_invariants();
    log::info!("{}: {} triangles", config.mesh.display(), mesh.len());

    let connection_count = connections.len();
    let report = verify_records(connections, &id_map, &mut mesh, config.verify_options())?;

    FlagWriter::new(&config.output).write(&mesh)?;
    let report = report.into_result()?;

    Ok(RunSummary {
        triangles: mesh.len(),
        connections: connection_count,
        report,
    })
}

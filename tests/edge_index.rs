mod util;
use fracture_intersect::prelude::*;
use util::*;

/// Structured `nx × ny` quad grid split into two triangles per quad, node ids
/// starting at `base`.
fn grid(nx: u64, ny: u64, base: u64) -> TriMesh {
    let id = |i: u64, j: u64| base + j * (nx + 1) + i;
    let mut triples = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let (a, b, c, d) = (id(i, j), id(i + 1, j), id(i, j + 1), id(i + 1, j + 1));
            triples.push([a, b, d]);
            triples.push([a, d, c]);
        }
    }
    mesh_of(&triples)
}

#[test]
fn grid_interior_edges_have_two_owners() {
    let mesh = grid(3, 2, 1000);
    let index = EdgeIndex::build(&mesh).unwrap();
    let span = index.span().unwrap();
    assert_eq!((span.min(), span.max()), (n(1000), n(1011)));

    // Diagonal of the first quad is interior to it; the edge between the
    // first two quads is interior to the grid.
    let diagonal = Edge::new(n(1000), n(1005));
    let between = Edge::new(n(1001), n(1005));
    let boundary = Edge::new(n(1000), n(1001));
    assert_eq!(index.query(diagonal).unwrap().count(), 2);
    assert_eq!(index.query(between).unwrap().count(), 2);
    assert_eq!(index.query(boundary).unwrap().count(), 1);
    // Opposite corners of a quad are not connected.
    assert_eq!(index.query(Edge::new(n(1001), n(1004))).unwrap().count(), 0);
}

#[test]
fn every_triangle_edge_is_found_under_its_owner() {
    let mesh = grid(4, 4, 7);
    let index = EdgeIndex::build(&mesh).unwrap();
    for (id, tri) in mesh.iter() {
        for edge in tri.edges() {
            let owners: Vec<_> = index.query(edge).unwrap().collect();
            assert!(
                owners.contains(&id),
                "{edge} of {id} not indexed under it: {owners:?}"
            );
        }
    }
    assert!(index.validate_invariants().is_ok());
    assert_eq!(index.stats().entries, 3 * mesh.len());
}

#[test]
fn bucket_entries_keep_triangle_load_order() {
    let mesh = mesh_of(&[[1, 2, 4], [1, 2, 3], [1, 3, 4]]);
    let index = EdgeIndex::build(&mesh).unwrap();
    let bucket = index.bucket(n(1)).unwrap().unwrap();
    let order: Vec<(u64, usize)> = bucket
        .iter()
        .map(|e| (e.hi.get(), e.triangle.index()))
        .collect();
    assert_eq!(order, vec![(2, 0), (4, 0), (2, 1), (3, 1), (3, 2), (4, 2)]);
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_build_matches_sequential_layout() {
    let mesh = grid(20, 15, 3);
    let seq = EdgeIndex::build(&mesh).unwrap();
    let par = EdgeIndex::build_par(&mesh).unwrap();
    assert_eq!(seq.span(), par.span());
    assert_eq!(seq.stats(), par.stats());
    let span = seq.span().unwrap();
    for raw in span.min().get()..=span.max().get() {
        assert_eq!(
            seq.bucket(n(raw)).unwrap().unwrap(),
            par.bucket(n(raw)).unwrap().unwrap(),
            "bucket {raw} differs"
        );
    }
}

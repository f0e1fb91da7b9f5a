mod util;
use std::collections::HashSet;

use fracture_intersect::io::flags::write_flags;
use fracture_intersect::prelude::*;
use proptest::prelude::*;
use util::*;

fn distinct_triples(raw: Vec<(u64, u64, u64)>) -> Vec<[u64; 3]> {
    raw.into_iter()
        .filter(|&(a, b, c)| a != b && b != c && a != c)
        .map(|(a, b, c)| [a, b, c])
        .collect()
}

proptest! {
    #[test]
    fn flags_follow_load_order(
        raw in prop::collection::vec((1u64..40, 1u64..40, 1u64..40), 1..80),
        picks in prop::collection::vec((0usize..1000, 0usize..3), 0..25),
    ) {
        let triples = distinct_triples(raw);
        prop_assume!(!triples.is_empty());
        let mut mesh = mesh_of(&triples);

        // Required connections are taken from real triangle edges, in a
        // direction that alternates so normalization is exercised.
        let required: Vec<Connection> = picks
            .iter()
            .enumerate()
            .map(|(k, &(t, e))| {
                let edge = mesh.triangles()[t % mesh.len()].edges()[e];
                if k % 2 == 0 {
                    Connection { a: edge.lo(), b: edge.hi() }
                } else {
                    Connection { a: edge.hi(), b: edge.lo() }
                }
            })
            .collect();
        let wanted: HashSet<Edge> = required.iter().map(|c| c.edge()).collect();

        let index = EdgeIndex::build(&mesh).unwrap();
        let report = verify_connections(&index, &mut mesh, &required, VerifyOptions::default())
            .unwrap();
        prop_assert!(report.is_verified());

        let expected: Vec<bool> = mesh
            .triangles()
            .iter()
            .map(|t| t.edges().iter().any(|e| wanted.contains(e)))
            .collect();
        prop_assert_eq!(mesh.flags(), expected.clone());

        let mut buf = Vec::new();
        write_flags(&mut buf, &mesh).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), mesh.len());
        for (line, flag) in lines.iter().zip(&expected) {
            prop_assert_eq!(*line, if *flag { "1" } else { "0" });
        }

        // A second pass over the same data changes nothing.
        let again = verify_connections(&index, &mut mesh, &required, VerifyOptions::default())
            .unwrap();
        prop_assert_eq!(again.marks_applied, 0);
        prop_assert_eq!(mesh.flags(), expected);
    }
}

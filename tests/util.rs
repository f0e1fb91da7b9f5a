#![allow(dead_code)]
use std::path::{Path, PathBuf};

use fracture_intersect::prelude::*;

pub fn n(u: u64) -> NodeId {
    NodeId::new(u)
}

/// Mesh from raw triples; panics on a degenerate triangle.
pub fn mesh_of(triples: &[[u64; 3]]) -> TriMesh {
    TriMesh::from_triples(triples.iter().map(|t| [n(t[0]), n(t[1]), n(t[2])]))
        .expect("test mesh has no degenerate triangles")
}

pub fn conns(pairs: &[(u64, u64)]) -> Vec<Connection> {
    pairs.iter().map(|&(a, b)| Connection::new(a, b)).collect()
}

/// Map each local id to itself.
pub fn identity_map(ids: impl IntoIterator<Item = u64>) -> IdMap {
    ids.into_iter().map(|i| (n(i), n(i))).collect()
}

pub fn flags_of(mesh: &TriMesh) -> Vec<u8> {
    mesh.flags().into_iter().map(u8::from).collect()
}

/// Scratch directory under the system temp dir, removed on drop.
pub struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "fracture-intersect-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Scratch { dir }
    }

    pub fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(file);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

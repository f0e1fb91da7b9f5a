//! Per-triangle intersection flag output.
//!
//! One line per triangle in load order, `1` if the triangle touches the
//! intersection and `0` otherwise. Files are written to a sibling temporary
//! and renamed into place, so the target is either the complete new flag file
//! or untouched.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::check_error::CheckError;
use crate::topology::mesh::TriMesh;

/// Write the flag lines of `mesh` to `writer`.
pub fn write_flags<W: Write>(writer: W, mesh: &TriMesh) -> io::Result<()> {
    let mut out = BufWriter::new(writer);
    for (id, tri) in mesh.iter() {
        log::trace!("{id}");
        out.write_all(if tri.is_on_intersection() { b"1\n" } else { b"0\n" })?;
    }
    out.flush()
}

/// Atomic flag file writer.
#[derive(Debug, Clone)]
pub struct FlagWriter {
    path: PathBuf,
}

impl FlagWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlagWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, reason: impl ToString) -> CheckError {
        CheckError::OutputWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn staging_path(&self) -> Result<PathBuf, CheckError> {
        let name = self
            .path
            .file_name()
            .ok_or_else(|| self.failure("path has no file name"))?;
        let mut staged = std::ffi::OsString::from(".");
        staged.push(name);
        staged.push(".partial");
        Ok(self.path.with_file_name(staged))
    }

    /// Write the flags of `mesh`, replacing any existing file.
    pub fn write(&self, mesh: &TriMesh) -> Result<(), CheckError> {
        let staged = self.staging_path()?;
        let result = File::create(&staged)
            .and_then(|file| {
                write_flags(&file, mesh)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&staged, &self.path));
        if let Err(e) = result {
            // The write error is reported, not a cleanup failure.
            let _ = fs::remove_file(&staged);
            return Err(self.failure(e));
        }
        log::info!("wrote {} flags to {}", mesh.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::node::NodeId;
    use crate::topology::triangle::TriangleId;

    #[test]
    fn one_line_per_triangle_in_order() {
        let n = NodeId::new;
        let mut mesh =
            TriMesh::from_triples([[n(1), n(2), n(3)], [n(2), n(3), n(4)], [n(3), n(4), n(5)]])
                .unwrap();
        mesh.mark(TriangleId::new(1)).unwrap();
        let mut buf = Vec::new();
        write_flags(&mut buf, &mesh).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0\n1\n0\n");
    }

    #[test]
    fn missing_directory_is_an_output_failure() {
        let path = std::env::temp_dir()
            .join("fracture-intersect-no-such-dir")
            .join("flags.txt");
        let err = FlagWriter::new(&path).write(&TriMesh::default()).unwrap_err();
        assert!(matches!(err, CheckError::OutputWrite { .. }));
        assert_eq!(err.exit_code(), 3);
        assert!(!path.exists());
    }
}

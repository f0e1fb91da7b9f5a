//! Record loading and flag emission.
//!
//! The readers turn the three input files of a run into flat in-memory
//! records (connections, an id map, a triangle mesh); the flag writer emits
//! one `0`/`1` line per triangle. Everything here works on any `Read`/`Write`
//! so tests can run from in-memory buffers; the `*_path` helpers add file
//! handling and attach the path to errors.

pub mod avs;
pub mod flags;
pub mod id_map;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::check_error::CheckError;

/// Slurp `reader` into a string, labelling failures with `source_name`.
pub(crate) fn read_all<R: Read>(mut reader: R, source_name: &str) -> Result<String, CheckError> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|e| CheckError::Io {
            path: source_name.into(),
            reason: e.to_string(),
        })?;
    Ok(contents)
}

pub(crate) fn open(path: &Path) -> Result<File, CheckError> {
    File::open(path).map_err(|e| CheckError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Non-blank, non-comment lines with their 1-based line numbers.
pub(crate) struct DataLines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> DataLines<'a> {
    pub(crate) fn new(contents: &'a str) -> Self {
        DataLines {
            inner: contents.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for DataLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|(i, line)| {
            let line = line.trim();
            (!line.is_empty() && !line.starts_with('#')).then_some((i + 1, line))
        })
    }
}

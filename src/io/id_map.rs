//! Reader for the intersection-node → global-node map.
//!
//! Two layouts are accepted, chosen by the first data line:
//! - one integer per line: the global id of local node `k`, where `k` is the
//!   1-based index of the data line;
//! - two integers per line: `local global`.
//!
//! Blank lines and `#` comments are skipped. Mixing layouts, non-integer
//! tokens and duplicate local ids are rejected.

use std::io::Read;

use crate::algs::remap::IdMap;
use crate::check_error::CheckError;
use crate::io::{DataLines, read_all};
use crate::topology::node::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    Sequence,
    Pairs,
}

#[derive(Debug, Clone)]
pub struct IdMapReader {
    source_name: String,
}

impl IdMapReader {
    pub fn new(source_name: impl Into<String>) -> Self {
        IdMapReader {
            source_name: source_name.into(),
        }
    }

    fn parse_id(&self, line: usize, raw: &str) -> Result<NodeId, CheckError> {
        raw.parse::<u64>().map(NodeId::new).map_err(|_| {
            CheckError::malformed(&self.source_name, line, format!("invalid node id: {raw}"))
        })
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<IdMap, CheckError> {
        let contents = read_all(reader, &self.source_name)?;
        let mut map = IdMap::new();
        let mut sequence = Vec::new();
        let mut layout = None;

        for (no, line) in DataLines::new(&contents) {
            let ids = line
                .split_whitespace()
                .map(|raw| self.parse_id(no, raw))
                .collect::<Result<Vec<_>, _>>()?;
            let this = match ids.len() {
                1 => Layout::Sequence,
                2 => Layout::Pairs,
                n => {
                    return Err(CheckError::malformed(
                        &self.source_name,
                        no,
                        format!("expected 1 or 2 ids per line, found {n}"),
                    ));
                }
            };
            if *layout.get_or_insert(this) != this {
                return Err(CheckError::malformed(
                    &self.source_name,
                    no,
                    "mixes single-id and `local global` lines",
                ));
            }
            if this == Layout::Sequence {
                sequence.push(ids[0]);
                continue;
            }
            let (local, global) = (ids[0], ids[1]);
            if let Some(previous) = map.insert(local, global) {
                return Err(CheckError::malformed(
                    &self.source_name,
                    no,
                    format!("local node {local} already mapped to {previous}"),
                ));
            }
        }
        if layout == Some(Layout::Sequence) {
            map = IdMap::from_sequence(sequence);
        }

        log::debug!("{}: {} local ids mapped", self.source_name, map.len());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    #[test]
    fn single_column_is_positional() {
        let map = IdMapReader::new("map")
            .read("# globals\n17\n\n42\n8\n".as_bytes())
            .unwrap();
        assert_eq!(map.get(n(1)), Some(n(17)));
        assert_eq!(map.get(n(2)), Some(n(42)));
        assert_eq!(map.get(n(3)), Some(n(8)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn two_columns_are_explicit_pairs() {
        let map = IdMapReader::new("map").read("5 100\n2 200\n".as_bytes()).unwrap();
        assert_eq!(map.get(n(5)), Some(n(100)));
        assert_eq!(map.get(n(2)), Some(n(200)));
        assert_eq!(map.get(n(1)), None);
    }

    #[test]
    fn mixed_layout_and_duplicates_are_rejected() {
        let reader = IdMapReader::new("map");
        assert!(matches!(
            reader.read("1 10\n20\n".as_bytes()),
            Err(CheckError::MalformedInput { line: 2, .. })
        ));
        assert!(matches!(
            reader.read("1 10\n1 11\n".as_bytes()),
            Err(CheckError::MalformedInput { line: 2, .. })
        ));
        assert!(matches!(
            reader.read("1 x\n".as_bytes()),
            Err(CheckError::MalformedInput { line: 1, .. })
        ));
    }
}

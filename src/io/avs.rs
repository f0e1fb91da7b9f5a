//! AVS UCD `.inp` reader.
//!
//! # Supported format
//! - ASCII UCD as written by LaGriT: a header `nnodes nelems nnd ncd nmd`,
//!   `nnodes` node lines `id x y z`, then `nelems` element lines
//!   `id material type n1 .. nk`.
//! - Element types: `pt`, `line`, `tri`, `quad`, `tet`, `pyr`, `prism`, `hex`.
//!
//! # Limitations
//! - Node and cell data blocks after the element list are ignored.
//! - Lines starting with `#` and blank lines are skipped anywhere.
//! - Node coordinates are checked for format only; nothing downstream uses them.

use std::io::Read;

use itertools::Itertools;

use crate::check_error::CheckError;
use crate::io::{DataLines, read_all};
use crate::topology::mesh::TriMesh;
use crate::topology::node::{Connection, NodeId};
use crate::topology::triangle::Triangle;

/// UCD cell type keywords.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UcdCellType {
    Point,
    Line,
    Tri,
    Quad,
    Tet,
    Pyramid,
    Prism,
    Hex,
}

impl UcdCellType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pt" => Some(UcdCellType::Point),
            "line" => Some(UcdCellType::Line),
            "tri" => Some(UcdCellType::Tri),
            "quad" => Some(UcdCellType::Quad),
            "tet" => Some(UcdCellType::Tet),
            "pyr" => Some(UcdCellType::Pyramid),
            "prism" => Some(UcdCellType::Prism),
            "hex" => Some(UcdCellType::Hex),
            _ => None,
        }
    }

    /// Number of nodes an element of this type lists.
    pub fn node_count(self) -> usize {
        match self {
            UcdCellType::Point => 1,
            UcdCellType::Line => 2,
            UcdCellType::Tri => 3,
            UcdCellType::Quad | UcdCellType::Tet => 4,
            UcdCellType::Pyramid => 5,
            UcdCellType::Prism => 6,
            UcdCellType::Hex => 8,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            UcdCellType::Point => "pt",
            UcdCellType::Line => "line",
            UcdCellType::Tri => "tri",
            UcdCellType::Quad => "quad",
            UcdCellType::Tet => "tet",
            UcdCellType::Pyramid => "pyr",
            UcdCellType::Prism => "prism",
            UcdCellType::Hex => "hex",
        }
    }
}

/// One element record of a UCD file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UcdElement {
    /// Line number in the source, for diagnostics.
    pub line: usize,
    pub cell_type: UcdCellType,
    pub nodes: Vec<NodeId>,
}

/// Reader for ASCII AVS UCD files.
#[derive(Debug, Clone)]
pub struct AvsReader {
    source_name: String,
}

impl AvsReader {
    /// `source_name` labels diagnostics, usually the file path.
    pub fn new(source_name: impl Into<String>) -> Self {
        AvsReader {
            source_name: source_name.into(),
        }
    }

    fn malformed(&self, line: usize, reason: impl Into<String>) -> CheckError {
        CheckError::malformed(&self.source_name, line, reason)
    }

    fn parse_count(&self, line: usize, raw: &str, what: &str) -> Result<usize, CheckError> {
        raw.parse::<usize>()
            .map_err(|_| self.malformed(line, format!("invalid {what}: {raw}")))
    }

    fn parse_node_id(&self, line: usize, raw: &str) -> Result<NodeId, CheckError> {
        raw.parse::<u64>()
            .map(NodeId::new)
            .map_err(|_| self.malformed(line, format!("invalid node id: {raw}")))
    }

    fn parse_coord(&self, line: usize, raw: &str) -> Result<f64, CheckError> {
        raw.parse::<f64>()
            .map_err(|_| self.malformed(line, format!("invalid coordinate: {raw}")))
    }

    /// Parse the element list of a UCD file.
    pub fn read_elements<R: Read>(&self, reader: R) -> Result<Vec<UcdElement>, CheckError> {
        let contents = read_all(reader, &self.source_name)?;
        let mut lines = DataLines::new(&contents);

        let (header_no, header) = lines
            .next()
            .ok_or_else(|| self.malformed(0, "missing UCD header"))?;
        let mut counts = header.split_whitespace();
        let node_count = self.parse_count(
            header_no,
            counts
                .next()
                .ok_or_else(|| self.malformed(header_no, "missing node count"))?,
            "node count",
        )?;
        let elem_count = self.parse_count(
            header_no,
            counts
                .next()
                .ok_or_else(|| self.malformed(header_no, "missing element count"))?,
            "element count",
        )?;

        for _ in 0..node_count {
            let (no, node_line) = lines
                .next()
                .ok_or_else(|| self.malformed(0, "unexpected end of node list"))?;
            let (id, x, y, z) = node_line
                .split_whitespace()
                .collect_tuple::<(&str, &str, &str, &str)>()
                .ok_or_else(|| self.malformed(no, "node line must be `id x y z`"))?;
            self.parse_node_id(no, id)?;
            for coord in [x, y, z] {
                self.parse_coord(no, coord)?;
            }
        }

        // The header count is untrusted; every element line holds at least
        // four tokens, so the text length bounds the real count.
        let mut elements = Vec::with_capacity(elem_count.min(contents.len() / 8));
        for _ in 0..elem_count {
            let (no, elem_line) = lines
                .next()
                .ok_or_else(|| self.malformed(0, "unexpected end of element list"))?;
            let mut parts = elem_line.split_whitespace();
            parts
                .next()
                .ok_or_else(|| self.malformed(no, "missing element id"))?;
            parts
                .next()
                .ok_or_else(|| self.malformed(no, "missing material id"))?;
            let keyword = parts
                .next()
                .ok_or_else(|| self.malformed(no, "missing element type"))?;
            let cell_type = UcdCellType::parse(keyword).ok_or_else(|| {
                self.malformed(no, format!("unsupported element type: {keyword}"))
            })?;
            let nodes = parts
                .map(|raw| self.parse_node_id(no, raw))
                .collect::<Result<Vec<_>, _>>()?;
            if nodes.len() != cell_type.node_count() {
                return Err(self.malformed(
                    no,
                    format!(
                        "`{}` element lists {} nodes, expected {}",
                        keyword,
                        nodes.len(),
                        cell_type.node_count()
                    ),
                ));
            }
            elements.push(UcdElement {
                line: no,
                cell_type,
                nodes,
            });
        }
        Ok(elements)
    }

    /// Read the `line` elements of an intersection file as required connections.
    pub fn read_connections<R: Read>(&self, reader: R) -> Result<Vec<Connection>, CheckError> {
        self.read_elements(reader)?
            .into_iter()
            .map(|elem| match (elem.cell_type, elem.nodes.as_slice()) {
                (UcdCellType::Line, &[a, b]) if a != b => Ok(Connection { a, b }),
                (UcdCellType::Line, _) => {
                    Err(self.malformed(elem.line, "line element joins a node to itself"))
                }
                (other, _) => Err(self.malformed(
                    elem.line,
                    format!(
                        "intersection files hold `line` elements, found `{}`",
                        other.keyword()
                    ),
                )),
            })
            .collect()
    }

    /// Read the `tri` elements of a mesh file, sorting each triangle's nodes.
    pub fn read_mesh<R: Read>(&self, reader: R) -> Result<TriMesh, CheckError> {
        let triangles = self
            .read_elements(reader)?
            .into_iter()
            .map(|elem| match (elem.cell_type, elem.nodes.as_slice()) {
                (UcdCellType::Tri, &[a, b, c]) => Triangle::try_new([a, b, c])
                    .ok_or_else(|| self.malformed(elem.line, "triangle repeats a node")),
                (other, _) => Err(self.malformed(
                    elem.line,
                    format!("mesh files hold `tri` elements, found `{}`", other.keyword()),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TriMesh::new(triangles))
    }
}

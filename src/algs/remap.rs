//! Intersection-local → global node id remapping.

use hashbrown::HashMap;

use crate::check_error::CheckError;
use crate::topology::node::{Connection, NodeId};

/// Mapping from intersection-local node ids to global mesh node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    map: HashMap<NodeId, NodeId>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map local id `i + 1` to `globals[i]`.
    pub fn from_sequence(globals: impl IntoIterator<Item = NodeId>) -> Self {
        let map = globals
            .into_iter()
            .enumerate()
            .map(|(i, g)| (NodeId::new(i as u64 + 1), g))
            .collect();
        IdMap { map }
    }

    /// Record `local → global`, returning the previous global id if any.
    pub fn insert(&mut self, local: NodeId, global: NodeId) -> Option<NodeId> {
        self.map.insert(local, global)
    }

    #[inline]
    pub fn get(&self, local: NodeId) -> Option<NodeId> {
        self.map.get(&local).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Rewrite both endpoints of one connection into global numbering.
    pub fn remap(&self, connection: Connection) -> Result<Connection, CheckError> {
        let lookup = |local| {
            self.get(local)
                .ok_or(CheckError::UnmappedLocalId { local, connection })
        };
        Ok(Connection {
            a: lookup(connection.a)?,
            b: lookup(connection.b)?,
        })
    }
}

impl FromIterator<(NodeId, NodeId)> for IdMap {
    fn from_iter<I: IntoIterator<Item = (NodeId, NodeId)>>(iter: I) -> Self {
        IdMap {
            map: iter.into_iter().collect(),
        }
    }
}

/// Rewrite every connection into global numbering.
///
/// Consumes the local list so a failure leaves no half-remapped state behind.
pub fn remap_connections(
    map: &IdMap,
    connections: Vec<Connection>,
) -> Result<Vec<Connection>, CheckError> {
    let remapped = connections
        .into_iter()
        .map(|c| map.remap(c))
        .collect::<Result<Vec<_>, _>>()?;
    for (local, global) in remapped.iter().enumerate() {
        log::trace!("connection {} -> global {global}", local + 1);
    }
    Ok(remapped)
}

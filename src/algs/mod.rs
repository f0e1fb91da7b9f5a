//! Algorithms on a loaded triangle mesh: edge indexing, id remapping and
//! connectivity verification.

pub mod edge_index;
pub mod remap;
pub mod verify;

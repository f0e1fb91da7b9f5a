//! Node, edge and triangle types plus the triangle arena.

pub mod bounds;
pub mod mesh;
pub mod node;
pub mod triangle;

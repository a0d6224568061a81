//! Mutable vertex/edge container used for parent graphs and samples.
//!
//! The container supports directed and undirected edge semantics, successor
//! and predecessor queries, and edge lookup by endpoint pair. Vertices and
//! edges iterate in ascending identifier order so seeded algorithms built on
//! top of it stay reproducible.

mod store;
mod types;

pub use self::{
    store::Graph,
    types::{Edge, EdgeId, EdgeInsertion, EdgeType, VertexId},
};

#[cfg(test)]
mod tests;

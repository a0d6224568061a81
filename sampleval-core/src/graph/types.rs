//! Identifier and edge value types shared by the graph container.

use std::fmt;

/// Opaque vertex identifier.
///
/// # Examples
/// ```
/// use sampleval_core::VertexId;
///
/// let id = VertexId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a vertex identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Opaque edge identifier, unique within one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates an edge identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Whether edges carry an orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// `(a, b)` and `(b, a)` are distinct edges.
    Directed,
    /// `(a, b)` and `(b, a)` denote the same connection.
    #[default]
    Undirected,
}

impl EdgeType {
    /// Returns `true` for [`EdgeType::Directed`].
    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::Directed)
    }
}

/// An edge as stored by [`crate::Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    id: EdgeId,
    source: VertexId,
    target: VertexId,
}

impl Edge {
    /// Creates an edge between `source` and `target`.
    #[must_use]
    pub const fn new(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Self { id, source, target }
    }

    /// Returns the edge identifier.
    #[must_use]
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the stored source endpoint.
    #[must_use]
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the stored target endpoint.
    #[must_use]
    pub const fn target(&self) -> VertexId {
        self.target
    }

    /// Returns the endpoint opposite `vertex`, or `None` when `vertex` is not
    /// incident to this edge.
    #[must_use]
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.source {
            Some(self.target)
        } else if vertex == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Outcome of [`crate::Graph::insert_edge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// The edge was added.
    Inserted,
    /// An identical edge (same id and endpoints) was already present.
    AlreadyPresent,
    /// The graph is undirected and already stores the reversed pair.
    ReversePairPresent,
}

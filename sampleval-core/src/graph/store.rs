//! Adjacency-list storage backing [`Graph`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::GraphError;

use super::types::{Edge, EdgeId, EdgeInsertion, EdgeType, VertexId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Adjacency {
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

/// Mutable graph container with directed or undirected edge semantics.
///
/// Undirected graphs never hold both `(a, b)` and `(b, a)`: inserting the
/// reversed pair reports [`EdgeInsertion::ReversePairPresent`] and leaves the
/// graph unchanged. Parallel edges in the same orientation are kept when their
/// identifiers differ.
///
/// # Examples
/// ```
/// use sampleval_core::{EdgeType, Graph, VertexId};
///
/// let mut graph = Graph::new(EdgeType::Directed);
/// graph.connect(VertexId::new(0), VertexId::new(1));
/// graph.connect(VertexId::new(1), VertexId::new(2));
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.successors(VertexId::new(1)), vec![VertexId::new(2)]);
/// assert_eq!(graph.predecessors(VertexId::new(1)), vec![VertexId::new(0)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    edge_type: EdgeType,
    adjacency: BTreeMap<VertexId, Adjacency>,
    edges: BTreeMap<EdgeId, Edge>,
    pairs: HashMap<(VertexId, VertexId), Vec<EdgeId>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new(edge_type: EdgeType) -> Self {
        Self {
            edge_type,
            adjacency: BTreeMap::new(),
            edges: BTreeMap::new(),
            pairs: HashMap::new(),
        }
    }

    /// Returns the edge semantics of this graph.
    #[must_use]
    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    /// Returns `true` when the graph is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.edge_type.is_directed()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Adds `vertex`, returning `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: VertexId) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Adjacency::default());
        true
    }

    /// Returns `true` when `vertex` is part of the graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Iterates vertices in ascending identifier order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterates edges in ascending identifier order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Looks up an edge by identifier.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Returns `true` when an edge with `id` is stored.
    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Inserts `edge`, keeping its identifier.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when an endpoint is missing and
    /// [`GraphError::DuplicateEdgeId`] when the identifier is already used by
    /// a different endpoint pair.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<EdgeInsertion, GraphError> {
        let (source, target) = (edge.source(), edge.target());
        for vertex in [source, target] {
            if !self.contains_vertex(vertex) {
                return Err(GraphError::UnknownVertex { vertex });
            }
        }
        if let Some(existing) = self.edges.get(&edge.id()) {
            if existing.source() == source && existing.target() == target {
                return Ok(EdgeInsertion::AlreadyPresent);
            }
            return Err(GraphError::DuplicateEdgeId {
                edge: edge.id(),
                existing_source: existing.source(),
                existing_target: existing.target(),
            });
        }
        if !self.is_directed() && source != target && self.pairs.contains_key(&(target, source)) {
            return Ok(EdgeInsertion::ReversePairPresent);
        }

        self.edges.insert(edge.id(), edge);
        self.pairs.entry((source, target)).or_default().push(edge.id());
        if let Some(adjacency) = self.adjacency.get_mut(&source) {
            adjacency.outgoing.push(edge.id());
        }
        if let Some(adjacency) = self.adjacency.get_mut(&target) {
            adjacency.incoming.push(edge.id());
        }
        Ok(EdgeInsertion::Inserted)
    }

    /// Connects `source` to `target` under a fresh identifier, adding missing
    /// endpoints.
    ///
    /// Returns `None` when an undirected graph already stores the reversed
    /// pair.
    pub fn connect(&mut self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        self.add_vertex(source);
        self.add_vertex(target);
        let id = self.next_edge_id();
        match self.insert_edge(Edge::new(id, source, target)) {
            Ok(EdgeInsertion::Inserted) => Some(id),
            Ok(EdgeInsertion::AlreadyPresent | EdgeInsertion::ReversePairPresent) | Err(_) => None,
        }
    }

    /// Returns the smallest identifier greater than every stored edge id.
    #[must_use]
    pub fn next_edge_id(&self) -> EdgeId {
        self.edges
            .keys()
            .next_back()
            .map_or(EdgeId::new(0), |last| EdgeId::new(last.get() + 1))
    }

    /// Vertices reachable from `vertex` along one edge.
    ///
    /// Undirected graphs report every neighbour. The result is sorted and
    /// free of duplicates.
    #[must_use]
    pub fn successors(&self, vertex: VertexId) -> Vec<VertexId> {
        if self.is_directed() {
            self.collect_endpoints(vertex, true, false)
        } else {
            self.neighbors(vertex)
        }
    }

    /// Vertices with an edge into `vertex`.
    ///
    /// Undirected graphs report every neighbour.
    #[must_use]
    pub fn predecessors(&self, vertex: VertexId) -> Vec<VertexId> {
        if self.is_directed() {
            self.collect_endpoints(vertex, false, true)
        } else {
            self.neighbors(vertex)
        }
    }

    /// Every vertex sharing an edge with `vertex`, regardless of orientation.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> Vec<VertexId> {
        self.collect_endpoints(vertex, true, true)
    }

    /// Number of edges leaving `vertex` (every incident edge when undirected).
    #[must_use]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.adjacency.get(&vertex).map_or(0, |adjacency| {
            if self.is_directed() {
                adjacency.outgoing.len()
            } else {
                adjacency.outgoing.len() + adjacency.incoming.len()
            }
        })
    }

    /// Number of edges entering `vertex` (every incident edge when undirected).
    #[must_use]
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.adjacency.get(&vertex).map_or(0, |adjacency| {
            if self.is_directed() {
                adjacency.incoming.len()
            } else {
                adjacency.outgoing.len() + adjacency.incoming.len()
            }
        })
    }

    /// Edges that can be followed away from `vertex`, in insertion order.
    ///
    /// Directed graphs report outgoing edges only.
    #[must_use]
    pub fn incident_edges(&self, vertex: VertexId) -> Vec<EdgeId> {
        let Some(adjacency) = self.adjacency.get(&vertex) else {
            return Vec::new();
        };
        if self.is_directed() {
            return adjacency.outgoing.clone();
        }
        self.touching_edges(vertex)
    }

    /// Every edge with `vertex` as an endpoint, outgoing edges first.
    ///
    /// Self-loops are reported once.
    #[must_use]
    pub fn touching_edges(&self, vertex: VertexId) -> Vec<EdgeId> {
        let Some(adjacency) = self.adjacency.get(&vertex) else {
            return Vec::new();
        };
        let mut edges = adjacency.outgoing.clone();
        // Self-loops appear in both lists.
        edges.extend(adjacency.incoming.iter().copied().filter(|id| {
            self.edges
                .get(id)
                .is_some_and(|edge| edge.source() != edge.target())
        }));
        edges
    }

    /// Edges running from `source` to `target`.
    ///
    /// Undirected graphs match either stored orientation.
    #[must_use]
    pub fn edges_between(&self, source: VertexId, target: VertexId) -> Vec<EdgeId> {
        let mut found: Vec<EdgeId> = self
            .pairs
            .get(&(source, target))
            .cloned()
            .unwrap_or_default();
        if !self.is_directed() && source != target {
            if let Some(reverse) = self.pairs.get(&(target, source)) {
                found.extend(reverse.iter().copied());
            }
        }
        found
    }

    fn collect_endpoints(&self, vertex: VertexId, outgoing: bool, incoming: bool) -> Vec<VertexId> {
        let Some(adjacency) = self.adjacency.get(&vertex) else {
            return Vec::new();
        };
        let mut endpoints = BTreeSet::new();
        if outgoing {
            endpoints.extend(
                adjacency
                    .outgoing
                    .iter()
                    .filter_map(|id| self.edges.get(id))
                    .map(Edge::target),
            );
        }
        if incoming {
            endpoints.extend(
                adjacency
                    .incoming
                    .iter()
                    .filter_map(|id| self.edges.get(id))
                    .map(Edge::source),
            );
        }
        endpoints.into_iter().collect()
    }
}

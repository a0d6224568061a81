//! Parent-graph views and induced edge copying shared by every policy.

use std::collections::BTreeSet;

use crate::{
    error::SamplingError,
    graph::{EdgeId, EdgeInsertion, EdgeType, Graph, VertexId},
};

use super::session::GrowthSession;

/// The parent graph seen through the sampler's edge semantics.
///
/// An undirected sampler over a directed parent treats every edge as
/// traversable both ways.
#[derive(Clone, Copy)]
pub(super) struct ParentView<'a> {
    graph: &'a Graph,
    directed: bool,
}

impl<'a> ParentView<'a> {
    pub(super) fn new(graph: &'a Graph, edge_type: EdgeType) -> Self {
        Self {
            graph,
            directed: edge_type.is_directed(),
        }
    }

    pub(super) fn is_directed(&self) -> bool {
        self.directed
    }

    pub(super) fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub(super) fn successors(&self, vertex: VertexId) -> Vec<VertexId> {
        if self.directed {
            self.graph.successors(vertex)
        } else {
            self.graph.neighbors(vertex)
        }
    }

    pub(super) fn predecessors(&self, vertex: VertexId) -> Vec<VertexId> {
        if self.directed {
            self.graph.predecessors(vertex)
        } else {
            self.graph.neighbors(vertex)
        }
    }

    /// Edges that can be followed away from `vertex`, paired with the vertex
    /// they lead to.
    pub(super) fn followable_edges(&self, vertex: VertexId) -> Vec<(EdgeId, VertexId)> {
        let ids = if self.directed {
            self.graph.incident_edges(vertex)
        } else {
            self.graph.touching_edges(vertex)
        };
        ids.into_iter()
            .filter_map(|id| {
                let edge = self.graph.edge(id)?;
                edge.opposite(vertex).map(|other| (id, other))
            })
            .collect()
    }
}

/// Adds `vertex` to the sample together with every parent edge linking it to
/// an already-sampled vertex.
///
/// Returns `Ok(false)` without touching the session when `vertex` is already
/// sampled.
pub(super) fn materialize(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    vertex: VertexId,
    via: Option<VertexId>,
) -> Result<bool, SamplingError> {
    if !session.sampled.add_vertex(vertex) {
        return Ok(false);
    }
    let graph = parent.graph();
    let induced: BTreeSet<EdgeId> = graph
        .touching_edges(vertex)
        .into_iter()
        .filter(|id| {
            graph
                .edge(*id)
                .and_then(|edge| edge.opposite(vertex))
                .is_some_and(|other| session.sampled.contains_vertex(other))
        })
        .collect();
    for id in induced {
        let Some(edge) = graph.edge(id) else { continue };
        // Reverse pairs are dropped when an undirected sample already holds
        // the opposite orientation.
        let _: EdgeInsertion = session.sampled.insert_edge(*edge)?;
    }

    session.order.push(vertex);
    session.last_visited = Some(vertex);
    session.stale_steps = 0;
    if session.burns {
        session.burning.push_back(vertex);
    }
    if let Some(discoverer) = via {
        session.discovered_by.insert(vertex, discoverer);
    }
    session.bump();
    record_materialized();
    Ok(true)
}

#[cfg(feature = "metrics")]
fn record_materialized() {
    metrics::counter!("sampler_vertices_materialized").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_materialized() {}

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::instrument;

use crate::{
    error::MetricsError,
    graph::{Graph, VertexId},
};

use super::{MetricMap, MetricsAnalyzer, ensure_non_empty};

/// Local clustering coefficient over the undirected simple view of a graph.
///
/// For a vertex with `k ≥ 2` distinct neighbours (self excluded) the value is
/// the number of linked neighbour pairs divided by `k(k - 1) / 2`. Vertices
/// with fewer neighbours score zero. Edge orientation and parallel edges are
/// ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClusteringAnalyzer;

impl MetricsAnalyzer for ClusteringAnalyzer {
    fn name(&self) -> &'static str {
        "clustering"
    }

    #[instrument(
        name = "metrics.clustering",
        err,
        skip(self, graph),
        fields(vertices = graph.vertex_count())
    )]
    fn analyze(&self, graph: &Graph) -> Result<MetricMap, MetricsError> {
        ensure_non_empty(self.name(), graph)?;
        let vertices: Vec<VertexId> = graph.vertices().collect();
        Ok(vertices
            .into_par_iter()
            .map(|vertex| (vertex, local_coefficient(graph, vertex)))
            .collect())
    }
}

fn simple_neighbors(graph: &Graph, vertex: VertexId) -> BTreeSet<VertexId> {
    graph
        .neighbors(vertex)
        .into_iter()
        .filter(|&neighbor| neighbor != vertex)
        .collect()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "the coefficient is a ratio of pair counts"
)]
fn local_coefficient(graph: &Graph, vertex: VertexId) -> f64 {
    let neighbors = simple_neighbors(graph, vertex);
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }
    let links = neighbors
        .iter()
        .map(|&a| {
            simple_neighbors(graph, a)
                .range((std::ops::Bound::Excluded(a), std::ops::Bound::Unbounded))
                .filter(|b| neighbors.contains(b))
                .count()
        })
        .sum::<usize>();
    let possible = k * (k - 1) / 2;
    links as f64 / possible as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeType;
    use rstest::rstest;

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    #[rstest]
    #[case(EdgeType::Undirected)]
    #[case(EdgeType::Directed)]
    fn triangles_are_fully_clustered(#[case] edge_type: EdgeType) {
        let mut graph = Graph::new(edge_type);
        graph.connect(v(0), v(1));
        graph.connect(v(1), v(2));
        graph.connect(v(2), v(0));
        let clustering = ClusteringAnalyzer.analyze(&graph).expect("non-empty");
        assert!(clustering.values().all(|&value| value == 1.0));
    }

    #[test]
    fn a_triangle_with_a_tail() {
        let mut graph = Graph::new(EdgeType::Undirected);
        graph.connect(v(0), v(1));
        graph.connect(v(1), v(2));
        graph.connect(v(2), v(0));
        graph.connect(v(2), v(3));
        graph.connect(v(3), v(3));
        let clustering = ClusteringAnalyzer.analyze(&graph).expect("non-empty");
        assert_eq!(clustering.get(&v(0)), Some(&1.0));
        let hub = clustering.get(&v(2)).copied().expect("vertex 2 is present");
        assert!((hub - 1.0 / 3.0).abs() < 1e-12, "hub = {hub}");
        // The self-loop does not make vertex 3 a neighbour of itself.
        assert_eq!(clustering.get(&v(3)), Some(&0.0));
    }

    #[test]
    fn stars_have_no_clustering() {
        let mut graph = Graph::new(EdgeType::Undirected);
        for leaf in 1..6 {
            graph.connect(v(0), v(leaf));
        }
        let clustering = ClusteringAnalyzer.analyze(&graph).expect("non-empty");
        assert!(clustering.values().all(|&value| value == 0.0));
        assert_eq!(clustering.len(), 6);
    }
}

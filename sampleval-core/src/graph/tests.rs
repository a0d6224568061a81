use rstest::rstest;

use super::*;
use crate::error::GraphError;

fn v(id: u64) -> VertexId {
    VertexId::new(id)
}

fn graph_with_vertices(edge_type: EdgeType, count: u64) -> Graph {
    let mut graph = Graph::new(edge_type);
    for id in 0..count {
        graph.add_vertex(v(id));
    }
    graph
}

#[test]
fn add_vertex_reports_duplicates() {
    let mut graph = Graph::new(EdgeType::Undirected);
    assert!(graph.add_vertex(v(3)));
    assert!(!graph.add_vertex(v(3)));
    assert_eq!(graph.vertex_count(), 1);
    assert!(graph.contains_vertex(v(3)));
}

#[test]
fn insert_edge_requires_known_endpoints() {
    let mut graph = graph_with_vertices(EdgeType::Directed, 1);
    let err = graph
        .insert_edge(Edge::new(EdgeId::new(0), v(0), v(9)))
        .expect_err("missing endpoint must fail");
    assert_eq!(err, GraphError::UnknownVertex { vertex: v(9) });
    assert_eq!(err.code().as_str(), "GRAPH_UNKNOWN_VERTEX");
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn edge_ids_are_unique() {
    let mut graph = graph_with_vertices(EdgeType::Directed, 3);
    let edge = Edge::new(EdgeId::new(5), v(0), v(1));
    assert_eq!(graph.insert_edge(edge), Ok(EdgeInsertion::Inserted));
    assert_eq!(graph.insert_edge(edge), Ok(EdgeInsertion::AlreadyPresent));

    let err = graph
        .insert_edge(Edge::new(EdgeId::new(5), v(1), v(2)))
        .expect_err("reused id must fail");
    assert_eq!(err.code().as_str(), "GRAPH_DUPLICATE_EDGE_ID");
    assert_eq!(graph.edge_count(), 1);
}

#[rstest]
#[case(EdgeType::Undirected, EdgeInsertion::ReversePairPresent, 1)]
#[case(EdgeType::Directed, EdgeInsertion::Inserted, 2)]
fn reverse_pairs_follow_edge_semantics(
    #[case] edge_type: EdgeType,
    #[case] expected: EdgeInsertion,
    #[case] edges: usize,
) {
    let mut graph = graph_with_vertices(edge_type, 2);
    graph
        .insert_edge(Edge::new(EdgeId::new(0), v(0), v(1)))
        .expect("first edge inserts");
    assert_eq!(
        graph.insert_edge(Edge::new(EdgeId::new(1), v(1), v(0))),
        Ok(expected)
    );
    assert_eq!(graph.edge_count(), edges);
}

#[test]
fn parallel_edges_with_distinct_ids_are_kept() {
    let mut graph = Graph::new(EdgeType::Undirected);
    assert_eq!(graph.connect(v(0), v(1)), Some(EdgeId::new(0)));
    assert_eq!(graph.connect(v(0), v(1)), Some(EdgeId::new(1)));
    assert_eq!(graph.connect(v(1), v(0)), None);
    assert_eq!(graph.edges_between(v(1), v(0)).len(), 2);
    assert_eq!(graph.neighbors(v(0)), vec![v(1)]);
}

#[test]
fn directed_queries_respect_orientation() {
    let mut graph = Graph::new(EdgeType::Directed);
    graph.connect(v(0), v(1));
    graph.connect(v(2), v(1));
    graph.connect(v(1), v(3));

    assert_eq!(graph.successors(v(1)), vec![v(3)]);
    assert_eq!(graph.predecessors(v(1)), vec![v(0), v(2)]);
    assert_eq!(graph.neighbors(v(1)), vec![v(0), v(2), v(3)]);
    assert_eq!(graph.out_degree(v(1)), 1);
    assert_eq!(graph.in_degree(v(1)), 2);
    assert_eq!(graph.incident_edges(v(1)), vec![EdgeId::new(2)]);
    assert_eq!(graph.touching_edges(v(1)).len(), 3);
    assert!(graph.edges_between(v(1), v(0)).is_empty());
}

#[test]
fn undirected_queries_ignore_orientation() {
    let mut graph = Graph::new(EdgeType::Undirected);
    graph.connect(v(0), v(1));
    graph.connect(v(2), v(1));

    assert_eq!(graph.successors(v(1)), vec![v(0), v(2)]);
    assert_eq!(graph.predecessors(v(1)), graph.successors(v(1)));
    assert_eq!(graph.out_degree(v(1)), 2);
    assert_eq!(graph.in_degree(v(1)), 2);
    assert_eq!(graph.incident_edges(v(1)).len(), 2);
    assert_eq!(graph.edges_between(v(1), v(2)), vec![EdgeId::new(1)]);
}

#[test]
fn self_loops_are_reported_once() {
    let mut graph = Graph::new(EdgeType::Undirected);
    graph.connect(v(4), v(4));
    assert_eq!(graph.touching_edges(v(4)), vec![EdgeId::new(0)]);
    assert_eq!(graph.neighbors(v(4)), vec![v(4)]);
}

#[test]
fn iteration_is_ordered_by_identifier() {
    let mut graph = graph_with_vertices(EdgeType::Directed, 0);
    for id in [9, 2, 5] {
        graph.add_vertex(v(id));
    }
    for (id, source, target) in [(7, 9, 2), (1, 2, 5)] {
        graph
            .insert_edge(Edge::new(EdgeId::new(id), v(source), v(target)))
            .expect("endpoints exist");
    }
    let vertices: Vec<u64> = graph.vertices().map(VertexId::get).collect();
    let edges: Vec<u64> = graph.edges().map(|edge| edge.id().get()).collect();
    assert_eq!(vertices, vec![2, 5, 9]);
    assert_eq!(edges, vec![1, 7]);
    assert_eq!(graph.next_edge_id(), EdgeId::new(8));
}

#[test]
fn edge_opposite_endpoint() {
    let edge = Edge::new(EdgeId::new(0), v(1), v(2));
    assert_eq!(edge.opposite(v(1)), Some(v(2)));
    assert_eq!(edge.opposite(v(2)), Some(v(1)));
    assert_eq!(edge.opposite(v(3)), None);
    assert_eq!(edge.id().to_string(), "e0");
}

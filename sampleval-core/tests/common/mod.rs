use rand::{Rng, SeedableRng, rngs::SmallRng};
use sampleval_core::{EdgeType, Graph, VertexId};

/// A cycle over `len` vertices.
#[must_use]
pub fn ring(len: u64, edge_type: EdgeType) -> Graph {
    let mut graph = Graph::new(edge_type);
    for id in 0..len {
        graph.connect(VertexId::new(id), VertexId::new((id + 1) % len));
    }
    graph
}

/// A seeded Erdős–Rényi graph with a spanning path so every vertex has an
/// edge.
#[must_use]
pub fn random_graph(vertices: u64, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = ring(vertices, EdgeType::Undirected);
    for a in 0..vertices {
        for b in (a + 2)..vertices {
            if rng.gen_bool(p) {
                graph.connect(VertexId::new(a), VertexId::new(b));
            }
        }
    }
    graph
}

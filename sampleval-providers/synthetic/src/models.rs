//! Barabási–Albert and Erdős–Rényi generators.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sampleval_core::{EdgeType, Graph, VertexId};
use tracing::{debug, instrument};

use crate::errors::SyntheticError;

/// A random graph model with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphModel {
    /// Preferential attachment; each new vertex links to `edges_per_node`
    /// distinct existing vertices.
    BarabasiAlbert {
        /// Vertex count.
        nodes: usize,
        /// Links added per arriving vertex.
        edges_per_node: usize,
    },
    /// Every vertex pair is linked independently with `probability`.
    ErdosRenyi {
        /// Vertex count.
        nodes: usize,
        /// Per-pair link probability.
        probability: f64,
    },
}

impl GraphModel {
    /// Generates a graph from this model.
    ///
    /// # Errors
    /// See [`barabasi_albert`] and [`erdos_renyi`].
    pub fn generate(&self, seed: u64) -> Result<Graph, SyntheticError> {
        match *self {
            Self::BarabasiAlbert {
                nodes,
                edges_per_node,
            } => barabasi_albert(nodes, edges_per_node, seed),
            Self::ErdosRenyi { nodes, probability } => erdos_renyi(nodes, probability, seed),
        }
    }
}

/// Generates a Barabási–Albert scale-free graph.
///
/// The first `edges_per_node + 1` vertices form a complete graph. Each later
/// vertex then links to `edges_per_node` distinct earlier vertices, chosen
/// with probability proportional to their current degree.
///
/// # Errors
/// Returns [`SyntheticError::TooFewNodes`] when `nodes < 2` and
/// [`SyntheticError::InvalidAttachment`] unless
/// `1 <= edges_per_node < nodes`.
///
/// # Examples
/// ```
/// use sampleval_providers_synthetic::barabasi_albert;
///
/// let graph = barabasi_albert(50, 2, 7).expect("valid parameters");
/// assert_eq!(graph.vertex_count(), 50);
/// // Three seed edges, then two per arriving vertex.
/// assert_eq!(graph.edge_count(), 3 + 47 * 2);
/// ```
#[instrument(name = "synthetic.barabasi_albert", err)]
pub fn barabasi_albert(
    nodes: usize,
    edges_per_node: usize,
    seed: u64,
) -> Result<Graph, SyntheticError> {
    check_nodes(nodes)?;
    if edges_per_node == 0 || edges_per_node >= nodes {
        return Err(SyntheticError::InvalidAttachment {
            nodes,
            got: edges_per_node,
        });
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = empty_graph(nodes);
    let mut degrees = vec![0_usize; nodes];
    let initial = edges_per_node + 1;
    for i in 0..initial {
        for j in (i + 1)..initial {
            link(&mut graph, &mut degrees, i, j);
        }
    }
    for arriving in initial..nodes {
        let earlier = degrees.get(..arriving).unwrap_or_default();
        let mut attached = Vec::with_capacity(edges_per_node);
        while attached.len() < edges_per_node {
            let Some(target) = select_by_degree(&mut rng, earlier, &attached) else {
                break;
            };
            attached.push(target);
        }
        for &target in &attached {
            link(&mut graph, &mut degrees, arriving, target);
        }
    }
    debug!(edges = graph.edge_count(), "generated scale-free graph");
    Ok(graph)
}

/// Generates a `G(n, p)` Erdős–Rényi graph.
///
/// Pairs are visited in lexicographic order, so edge identifiers follow
/// `(i, j)` with `i < j`.
///
/// # Errors
/// Returns [`SyntheticError::TooFewNodes`] when `nodes < 2` and
/// [`SyntheticError::InvalidProbability`] unless `probability` lies in
/// `[0, 1]`.
#[instrument(name = "synthetic.erdos_renyi", err)]
pub fn erdos_renyi(nodes: usize, probability: f64, seed: u64) -> Result<Graph, SyntheticError> {
    check_nodes(nodes)?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(SyntheticError::InvalidProbability { got: probability });
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = empty_graph(nodes);
    let mut degrees = vec![0_usize; nodes];
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            if rng.gen_bool(probability) {
                link(&mut graph, &mut degrees, i, j);
            }
        }
    }
    debug!(edges = graph.edge_count(), "generated random graph");
    Ok(graph)
}

const fn check_nodes(nodes: usize) -> Result<(), SyntheticError> {
    if nodes < 2 {
        return Err(SyntheticError::TooFewNodes { min: 2, got: nodes });
    }
    Ok(())
}

fn vertex(index: usize) -> VertexId {
    VertexId::new(index as u64)
}

fn empty_graph(nodes: usize) -> Graph {
    let mut graph = Graph::new(EdgeType::Undirected);
    for index in 0..nodes {
        graph.add_vertex(vertex(index));
    }
    graph
}

fn link(graph: &mut Graph, degrees: &mut [usize], source: usize, target: usize) {
    if graph.connect(vertex(source), vertex(target)).is_some() {
        for index in [source, target] {
            if let Some(degree) = degrees.get_mut(index) {
                *degree += 1;
            }
        }
    }
}

/// Picks an index with probability proportional to its degree, skipping
/// `exclude`. Returns `None` once every index is excluded.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "roulette-wheel selection over degree weights"
)]
fn select_by_degree(rng: &mut SmallRng, degrees: &[usize], exclude: &[usize]) -> Option<usize> {
    let weights: Vec<f64> = degrees
        .iter()
        .enumerate()
        .map(|(index, &degree)| {
            if exclude.contains(&index) {
                0.0
            } else {
                degree.max(1) as f64
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let threshold = rng.gen_range(0.0..1.0) * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for (index, weight) in weights.iter().enumerate() {
        if *weight == 0.0 {
            continue;
        }
        cumulative += weight;
        last = Some(index);
        if cumulative > threshold {
            return last;
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1, 1, 1], &[0, 1], 2)]
    #[case(&[0, 5, 0], &[0, 2], 1)]
    fn selection_skips_excluded_indices(
        #[case] degrees: &[usize],
        #[case] exclude: &[usize],
        #[case] expected: usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(select_by_degree(&mut rng, degrees, exclude), Some(expected));
        }
    }

    #[test]
    fn selection_is_exhausted_when_everything_is_excluded() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(select_by_degree(&mut rng, &[2, 2], &[0, 1]), None);
    }

    #[test]
    fn selection_prefers_high_degrees() {
        let mut rng = SmallRng::seed_from_u64(11);
        let hits = (0..2000)
            .filter(|_| select_by_degree(&mut rng, &[1, 9], &[]) == Some(1))
            .count();
        assert!(hits > 1600, "hub chosen {hits} times out of 2000");
    }

    #[test]
    fn link_tracks_degrees() {
        let mut graph = empty_graph(3);
        let mut degrees = vec![0; 3];
        link(&mut graph, &mut degrees, 0, 2);
        assert_eq!(degrees, vec![1, 0, 1]);
    }
}

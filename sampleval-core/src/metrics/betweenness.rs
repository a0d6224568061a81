//! Brandes betweenness centrality.
//!
//! Every vertex `s` runs one breadth-first search that counts shortest paths
//! `σ(s, v)` and records shortest-path predecessors. Walking the search order
//! backwards accumulates the dependency
//!
//! ```text
//! δ(s, v) = Σ_{w : v ∈ P(s, w)} σ(s, v) / σ(s, w) · (1 + δ(s, w))
//! ```
//!
//! and the betweenness of `v` is the sum of `δ(s, v)` over all sources. The
//! sources are independent, so they are folded in parallel on the current
//! rayon pool.

use std::collections::{HashMap, VecDeque};

use rayon::prelude::*;
use tracing::instrument;

use crate::{
    error::MetricsError,
    graph::{Graph, VertexId},
};

use super::{MetricMap, MetricsAnalyzer, ensure_non_empty};

/// Betweenness centrality over unweighted shortest paths.
///
/// Directed graphs follow successors; undirected graphs count each path once.
/// Parallel edges do not multiply path counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetweennessAnalyzer {
    normalized: bool,
}

impl Default for BetweennessAnalyzer {
    fn default() -> Self {
        Self { normalized: true }
    }
}

impl BetweennessAnalyzer {
    /// Reports raw pair-dependency sums instead of values scaled to `[0, 1]`.
    #[must_use]
    pub const fn raw() -> Self {
        Self { normalized: false }
    }

    /// Whether scores are divided by the number of ordered vertex pairs.
    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        self.normalized
    }
}

impl MetricsAnalyzer for BetweennessAnalyzer {
    fn name(&self) -> &'static str {
        "betweenness"
    }

    #[instrument(
        name = "metrics.betweenness",
        err,
        skip(self, graph),
        fields(vertices = graph.vertex_count(), edges = graph.edge_count())
    )]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "centrality scores are floating-point sums"
    )]
    fn analyze(&self, graph: &Graph) -> Result<MetricMap, MetricsError> {
        ensure_non_empty(self.name(), graph)?;
        let topology = Topology::new(graph);
        let n = topology.vertices.len();

        let mut scores = (0..n)
            .into_par_iter()
            .fold(
                || vec![0.0_f64; n],
                |mut acc, source| {
                    topology.accumulate(source, &mut acc);
                    acc
                },
            )
            .reduce(
                || vec![0.0_f64; n],
                |mut left, right| {
                    for (total, value) in left.iter_mut().zip(right) {
                        *total += value;
                    }
                    left
                },
            );

        // Undirected sums visit every path from both ends. Normalising by the
        // ordered pair count absorbs that factor.
        let scale = if self.normalized && n > 2 {
            1.0 / ((n - 1) * (n - 2)) as f64
        } else if graph.is_directed() {
            1.0
        } else {
            0.5
        };
        for score in &mut scores {
            *score *= scale;
        }

        Ok(topology.vertices.into_iter().zip(scores).collect())
    }
}

/// Dense adjacency over vertex positions.
struct Topology {
    vertices: Vec<VertexId>,
    successors: Vec<Vec<usize>>,
}

impl Topology {
    fn new(graph: &Graph) -> Self {
        let vertices: Vec<VertexId> = graph.vertices().collect();
        let position: HashMap<VertexId, usize> = vertices
            .iter()
            .enumerate()
            .map(|(index, &vertex)| (vertex, index))
            .collect();
        let successors = vertices
            .iter()
            .map(|&vertex| {
                graph
                    .successors(vertex)
                    .into_iter()
                    .filter(|&next| next != vertex)
                    .filter_map(|next| position.get(&next).copied())
                    .collect()
            })
            .collect();
        Self {
            vertices,
            successors,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::indexing_slicing,
        reason = "dense per-source arrays are indexed by vertex position"
    )]
    fn accumulate(&self, source: usize, scores: &mut [f64]) {
        let n = self.vertices.len();
        let mut sigma = vec![0.0_f64; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::from([source]);
        sigma[source] = 1.0;
        distance[source] = Some(0);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let next_distance = distance[v].map_or(0, |d| d + 1);
            for &w in &self.successors[v] {
                if distance[w].is_none() {
                    distance[w] = Some(next_distance);
                    queue.push_back(w);
                }
                if distance[w] == Some(next_distance) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0_f64; n];
        for &w in order.iter().rev() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                scores[w] += delta[w];
            }
        }
    }
}

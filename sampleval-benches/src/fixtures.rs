//! Seeded inputs shared by the benchmarks.
//!
//! Graphs come from the Barabási–Albert generator so degree distributions
//! are skewed like the networks the samplers target. Series are correlated
//! but noisy so rank statistics see ties and inversions.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sampleval_core::{Graph, MetricMap, VertexId};
use sampleval_providers_synthetic::barabasi_albert;

use crate::error::BenchSetupError;

/// Edges added per arriving vertex in benchmark graphs.
pub const ATTACHMENT: usize = 3;

/// Builds a seeded scale-free graph with `vertex_count` vertices.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `vertex_count` is zero and
/// [`BenchSetupError::Synthetic`] when the generator rejects the size.
///
/// # Examples
/// ```
/// use sampleval_benches::fixtures::scale_free_graph;
///
/// let graph = scale_free_graph(50, 7).expect("valid size");
/// assert_eq!(graph.vertex_count(), 50);
/// ```
pub fn scale_free_graph(vertex_count: usize, seed: u64) -> Result<Graph, BenchSetupError> {
    if vertex_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "vertex_count",
        });
    }
    Ok(barabasi_albert(vertex_count, ATTACHMENT, seed)?)
}

/// Generates two correlated series of `len` values.
///
/// The second series adds uniform noise to the first and rounds both to one
/// decimal place, which introduces ties.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "benchmark inputs are random floating-point series"
)]
pub fn correlated_series(len: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let base: f64 = rng.gen_range(0.0..100.0);
            let noisy = base + rng.gen_range(-10.0..10.0);
            ((base * 10.0).round() / 10.0, (noisy * 10.0).round() / 10.0)
        })
        .unzip()
}

/// Pairs `values` with vertices `0..len`.
#[must_use]
pub fn metric_map(values: &[f64]) -> MetricMap {
    (0_u64..)
        .zip(values)
        .map(|(id, &value)| (VertexId::new(id), value))
        .collect()
}

//! Benchmark parameter labels.

use std::fmt;

/// Parameters for a sampler benchmark run.
#[derive(Clone, Debug)]
pub struct SamplerBenchParams {
    /// Vertices in the parent graph.
    pub vertex_count: usize,
    /// Target sample fraction.
    pub alpha: f64,
    /// Spread probability.
    pub mixture_ratio: f64,
}

impl fmt::Display for SamplerBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},alpha={},mix={}",
            self.vertex_count, self.alpha, self.mixture_ratio
        )
    }
}

/// Parameters for a metric analyzer benchmark run.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Vertices in the analysed graph.
    pub vertex_count: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.vertex_count)
    }
}

/// Parameters for a statistics benchmark run.
#[derive(Clone, Debug)]
pub struct SeriesBenchParams {
    /// Observations per series.
    pub len: usize,
}

impl fmt::Display for SeriesBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "len={}", self.len)
    }
}

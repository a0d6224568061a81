//! Per-vertex structural metrics.
//!
//! Analyzers turn a [`Graph`] into a [`MetricMap`]. The experiment layer runs
//! them once over the population and once per sample, then hands both maps
//! to [`crate::stats::compare_metric_maps`].

mod betweenness;
mod clustering;
mod degree;

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    error::MetricsError,
    graph::{Graph, VertexId},
};

pub use self::{
    betweenness::BetweennessAnalyzer, clustering::ClusteringAnalyzer, degree::DegreeAnalyzer,
};

/// Metric values keyed by vertex.
pub type MetricMap = BTreeMap<VertexId, f64>;

/// Computes one value per vertex of a graph.
pub trait MetricsAnalyzer: Send + Sync {
    /// Stable name used in reports and cached file names.
    fn name(&self) -> &'static str;

    /// Computes the metric for every vertex of `graph`.
    ///
    /// # Errors
    /// Returns [`MetricsError::EmptyGraph`] when `graph` has no vertices.
    fn analyze(&self, graph: &Graph) -> Result<MetricMap, MetricsError>;
}

/// The analyzers an experiment can request by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKind {
    /// Total degree, see [`DegreeAnalyzer`].
    Degree,
    /// Local clustering coefficient, see [`ClusteringAnalyzer`].
    Clustering,
    /// Normalised betweenness centrality, see [`BetweennessAnalyzer`].
    Betweenness,
}

impl MetricKind {
    /// Every metric kind in report order.
    pub const ALL: [Self; 3] = [Self::Degree, Self::Clustering, Self::Betweenness];

    /// Stable name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Clustering => "clustering",
            Self::Betweenness => "betweenness",
        }
    }

    /// Whether the metric is slow enough to run off the sampling pool.
    #[must_use]
    pub const fn is_expensive(self) -> bool {
        matches!(self, Self::Betweenness)
    }

    /// Returns the analyzer computing this metric.
    #[must_use]
    pub fn analyzer(self) -> Box<dyn MetricsAnalyzer> {
        match self {
            Self::Degree => Box::new(DegreeAnalyzer),
            Self::Clustering => Box::new(ClusteringAnalyzer),
            Self::Betweenness => Box::new(BetweennessAnalyzer::default()),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| MetricsError::UnknownMetric {
                name: name.to_owned(),
            })
    }
}

fn ensure_non_empty(analyzer: &'static str, graph: &Graph) -> Result<(), MetricsError> {
    if graph.vertex_count() == 0 {
        return Err(MetricsError::EmptyGraph { analyzer });
    }
    Ok(())
}

use tracing::instrument;

use crate::{error::MetricsError, graph::Graph};

use super::{MetricMap, MetricsAnalyzer, ensure_non_empty};

/// Counts edge endpoints at each vertex.
///
/// Directed graphs report in-degree plus out-degree. A self-loop contributes
/// two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DegreeAnalyzer;

impl MetricsAnalyzer for DegreeAnalyzer {
    fn name(&self) -> &'static str {
        "degree"
    }

    #[instrument(
        name = "metrics.degree",
        err,
        skip(self, graph),
        fields(vertices = graph.vertex_count())
    )]
    #[expect(clippy::cast_precision_loss, reason = "degrees are reported as metric values")]
    fn analyze(&self, graph: &Graph) -> Result<MetricMap, MetricsError> {
        ensure_non_empty(self.name(), graph)?;
        Ok(graph
            .vertices()
            .map(|vertex| {
                let degree = if graph.is_directed() {
                    graph.out_degree(vertex) + graph.in_degree(vertex)
                } else {
                    graph.out_degree(vertex)
                };
                (vertex, degree as f64)
            })
            .collect())
    }
}

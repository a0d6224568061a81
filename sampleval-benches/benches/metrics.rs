//! Metric analyzer benchmarks.
//!
//! Betweenness dominates experiment wall time, so it gets smaller graphs
//! than the linear-time analyzers.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sampleval_benches::{
    error::BenchSetupError, fixtures::scale_free_graph, params::GraphBenchParams,
};
use sampleval_core::MetricKind;

/// Seed used for all graph generation in this benchmark.
const SEED: u64 = 7;

const CHEAP_VERTEX_COUNTS: &[usize] = &[1_000, 10_000];
const EXPENSIVE_VERTEX_COUNTS: &[usize] = &[200, 1_000];

fn analyze_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    for kind in MetricKind::ALL {
        let mut group = c.benchmark_group(format!("analyze/{kind}"));
        group.sample_size(10);
        let sizes = if kind.is_expensive() {
            EXPENSIVE_VERTEX_COUNTS
        } else {
            CHEAP_VERTEX_COUNTS
        };
        let analyzer = kind.analyzer();
        for &vertex_count in sizes {
            let graph = scale_free_graph(vertex_count, SEED)?;
            // Fail setup rather than benchmarking an error path.
            analyzer.analyze(&graph)?;
            group.bench_with_input(
                BenchmarkId::from_parameter(GraphBenchParams { vertex_count }),
                &graph,
                |b, graph| b.iter(|| analyzer.analyze(graph)),
            );
        }
        group.finish();
    }
    Ok(())
}

fn analyze(c: &mut Criterion) {
    if let Err(err) = analyze_impl(c) {
        panic!("analyze benchmark setup failed: {err}");
    }
}

criterion_group!(benches, analyze);
criterion_main!(benches);

//! Sampler throughput benchmarks.
//!
//! Measures one full `sample_graph` call per policy on a fixed scale-free
//! parent, so differences reflect the spread move and materialisation cost.
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
    error::BenchSetupError, fixtures::scale_free_graph, params::SamplerBenchParams,
};
use sampleval_core::{
    BfsConfig, ForestFireConfig, Sampler, SamplerParams, SamplingPolicy, WalkConfig,
};

/// Seed used for graph generation and every sampler.
const SEED: u64 = 42;

/// Parent graph sizes to benchmark.
const VERTEX_COUNTS: &[usize] = &[1_000, 5_000];

const ALPHA: f64 = 0.2;
const MIXTURE_RATIO: f64 = 0.8;

fn policies() -> Vec<SamplingPolicy> {
    vec![
        SamplingPolicy::RandomNode,
        SamplingPolicy::Bfs(BfsConfig::full_frontier()),
        SamplingPolicy::Bfs(BfsConfig::bounded()),
        SamplingPolicy::RandomWalk(WalkConfig::uniform()),
        SamplingPolicy::RandomWalk(WalkConfig::metropolis_hastings()),
        SamplingPolicy::ForestFire(ForestFireConfig::default()),
    ]
}

fn sample_graph_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let params = SamplerParams::new(ALPHA, MIXTURE_RATIO)?.with_seed(SEED);
    for policy in policies() {
        let mut group = c.benchmark_group(format!("sample_graph/{}", policy.name()));
        group.sample_size(20);
        for &vertex_count in VERTEX_COUNTS {
            let parent = scale_free_graph(vertex_count, SEED)?;
            let bench_params = SamplerBenchParams {
                vertex_count,
                alpha: ALPHA,
                mixture_ratio: MIXTURE_RATIO,
            };
            group.bench_with_input(
                BenchmarkId::from_parameter(&bench_params),
                &parent,
                |b, parent| {
                    b.iter(|| {
                        let mut sampler = Sampler::new(policy.clone(), params);
                        sampler.sample_graph(parent)
                    });
                },
            );
        }
        group.finish();
    }
    Ok(())
}

fn sample_graph(c: &mut Criterion) {
    if let Err(err) = sample_graph_impl(c) {
        panic!("sample_graph benchmark setup failed: {err}");
    }
}

criterion_group!(benches, sample_graph);
criterion_main!(benches);

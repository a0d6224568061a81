//! Breadth-first spread behaviour.

use std::num::NonZeroUsize;

use super::fixtures::{assert_induced, params, path, sample, star, vertex};
use crate::{BfsConfig, EdgeType, Sampler, SamplingPolicy};

#[test]
fn same_seed_yields_identical_samples() {
    let parent = super::fixtures::random_graph(60, 0.08, 5, EdgeType::Undirected);
    for config in [BfsConfig::full_frontier(), BfsConfig::bounded()] {
        let first = sample(
            SamplingPolicy::Bfs(config),
            params(0.4, 0.8, 99, EdgeType::Undirected),
            &parent,
        );
        let second = sample(
            SamplingPolicy::Bfs(config),
            params(0.4, 0.8, 99, EdgeType::Undirected),
            &parent,
        );
        assert_eq!(first.sampled_graph(), second.sampled_graph());
        assert_eq!(first.session().insertion_order(), second.session().insertion_order());
    }
}

#[test]
fn full_frontier_grows_a_connected_ball() {
    let parent = path(30, EdgeType::Undirected);
    let sampler = sample(
        SamplingPolicy::Bfs(BfsConfig::full_frontier()),
        params(0.3, 1.0, 12, EdgeType::Undirected),
        &parent,
    );
    let sampled = sampler.sampled_graph();
    assert_eq!(sampled.vertex_count(), 9);
    // A contiguous stretch of a path keeps every internal edge.
    assert_eq!(sampled.edge_count(), 8);
    assert_induced(&parent, sampled);
}

#[test]
fn directed_frontier_follows_edge_orientation() {
    // 0 -> 1 -> ... -> 9: only the jump can reach vertices behind the start.
    let parent = path(10, EdgeType::Directed);
    let sampler = sample(
        SamplingPolicy::Bfs(BfsConfig::full_frontier()),
        params(0.5, 1.0, 3, EdgeType::Directed),
        &parent,
    );
    let order = sampler.session().insertion_order();
    for pair in order.windows(2) {
        if let [earlier, later] = pair {
            if sampler.session().discovered_via(*later).is_some() {
                assert_eq!(later.get(), earlier.get() + 1);
            }
        }
    }
}

#[test]
fn bounded_expansion_caps_fan_out() {
    let parent = star(40, EdgeType::Undirected);
    let config = BfsConfig::bounded()
        .with_max_degree(3)
        .expect("positive fan-out");
    assert_eq!(config.max_degree(), NonZeroUsize::new(3));

    let mut sampler = Sampler::new(
        SamplingPolicy::Bfs(config),
        params(1.0, 1.0, 7, EdgeType::Undirected),
    );
    sampler.sample_graph(&parent).expect("sampling succeeds");
    let session = sampler.session();
    let via_hub = session
        .insertion_order()
        .iter()
        .filter(|&&leaf| session.discovered_via(leaf) == Some(vertex(0)))
        .count();
    assert!(via_hub <= 3, "hub discovered {via_hub} leaves");
    assert_eq!(sampler.sampled_graph().vertex_count(), 41);
}

#[test]
fn bounded_expansion_records_discoverers() {
    let parent = path(6, EdgeType::Undirected);
    let sampler = sample(
        SamplingPolicy::Bfs(BfsConfig::bounded()),
        params(1.0, 1.0, 0, EdgeType::Undirected),
        &parent,
    );
    let session = sampler.session();
    for &member in session.insertion_order() {
        if let Some(parent_vertex) = session.discovered_via(member) {
            assert_eq!(parent_vertex.get().abs_diff(member.get()), 1);
        }
    }
}

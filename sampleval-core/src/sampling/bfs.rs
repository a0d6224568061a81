//! Breadth-first spread moves.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;

use super::{
    driver::SpreadOutcome,
    materialize::ParentView,
    policy::BfsConfig,
    session::GrowthSession,
};

pub(super) fn spread(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    config: BfsConfig,
) -> SpreadOutcome {
    if config.is_bounded() {
        expand_next(session, parent, config)
    } else {
        queue_full_frontier(session, parent)
    }
}

/// Queues the unsampled successors of every sampled vertex.
fn queue_full_frontier(session: &mut GrowthSession, parent: &ParentView<'_>) -> SpreadOutcome {
    let mut frontier = BTreeMap::new();
    for vertex in session.sampled.vertices() {
        for candidate in parent.successors(vertex) {
            if !session.sampled.contains_vertex(candidate) {
                frontier.entry(candidate).or_insert(vertex);
            }
        }
    }
    let mut queued = 0_usize;
    for (candidate, via) in frontier {
        if session.enqueue(candidate, Some(via)) {
            queued += 1;
        }
    }
    if queued == 0 {
        SpreadOutcome::Failed
    } else {
        SpreadOutcome::Progressed
    }
}

/// Expands sampled vertices in insertion order until one queues something.
fn expand_next(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    config: BfsConfig,
) -> SpreadOutcome {
    while let Some(&vertex) = session.order.get(session.expansion_cursor) {
        session.expansion_cursor += 1;
        session.bump();

        let mut edges = parent.followable_edges(vertex);
        if let Some(cap) = config.max_degree() {
            edges.shuffle(&mut session.rng);
            edges.truncate(cap.get());
        }
        let mut progressed = false;
        for (_, other) in edges {
            progressed |= session.enqueue(other, Some(vertex));
        }
        if progressed {
            return SpreadOutcome::Progressed;
        }
    }
    SpreadOutcome::Failed
}

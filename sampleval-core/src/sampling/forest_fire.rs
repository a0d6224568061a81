//! Forest-fire spread moves.

use rand::{Rng, seq::SliceRandom};

use crate::graph::VertexId;

use super::{
    driver::SpreadOutcome,
    materialize::ParentView,
    policy::ForestFireConfig,
    session::GrowthSession,
};

/// Burns every currently burning vertex once, queueing the neighbours it
/// ignites.
pub(super) fn spread(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    config: ForestFireConfig,
) -> SpreadOutcome {
    let burning: Vec<VertexId> = session.burning.drain(..).collect();
    if burning.is_empty() {
        return SpreadOutcome::Failed;
    }
    session.bump();

    let mut ignited = 0_usize;
    for vertex in burning {
        ignited += ignite(
            session,
            vertex,
            parent.successors(vertex),
            config.forward_burn_probability(),
        );
        if parent.is_directed() {
            ignited += ignite(
                session,
                vertex,
                parent.predecessors(vertex),
                config.backward_burn_probability(),
            );
        }
    }
    if ignited == 0 {
        SpreadOutcome::Failed
    } else {
        SpreadOutcome::Progressed
    }
}

/// Ignites a geometric number of the unsampled `candidates`: successes of a
/// `probability` coin before the first failure, capped at the candidate
/// count.
pub(super) fn ignite(
    session: &mut GrowthSession,
    source: VertexId,
    candidates: Vec<VertexId>,
    probability: f64,
) -> usize {
    let mut candidates: Vec<VertexId> = candidates
        .into_iter()
        .filter(|candidate| {
            !session.sampled.contains_vertex(*candidate) && !session.queued.contains(candidate)
        })
        .collect();
    let mut count = 0;
    while count < candidates.len() && session.rng.gen_bool(probability) {
        count += 1;
    }
    let (chosen, _) = candidates.partial_shuffle(&mut session.rng, count);
    let chosen = chosen.to_vec();
    let mut ignited = 0;
    for candidate in chosen {
        if session.enqueue(candidate, Some(source)) {
            ignited += 1;
        }
    }
    ignited
}

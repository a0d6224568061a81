//! Random-walk spread moves with uniform or Metropolis–Hastings steps.

use std::collections::BTreeSet;

use rand::{Rng, distributions::Standard, seq::SliceRandom};

use crate::{error::SamplingError, graph::VertexId};

use super::{
    driver::SpreadOutcome,
    materialize::{ParentView, materialize},
    policy::{WalkConfig, WalkTransition},
    rng::Permutation,
    session::GrowthSession,
};

pub(super) fn spread(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    config: WalkConfig,
    permutation: &mut Permutation,
) -> Result<SpreadOutcome, SamplingError> {
    let Some(current) = session.last_visited else {
        // The walker is placed by the first jump.
        return Ok(SpreadOutcome::Failed);
    };
    if session.stale_steps >= config.rerun_max() {
        return rehome(session, parent, permutation);
    }
    let successors = parent.successors(current);
    if successors.is_empty() {
        return rehome(session, parent, permutation);
    }

    let next = match config.transition() {
        WalkTransition::Uniform => successors.choose(&mut session.rng).copied(),
        WalkTransition::MetropolisHastings => {
            metropolis_hastings_step(session, parent, &successors)
        }
    }
    .unwrap_or(current);

    if materialize(session, parent, next, Some(current))? {
        return Ok(SpreadOutcome::Progressed);
    }
    session.last_visited = Some(next);
    session.stale_steps += 1;
    session.bump();
    Ok(SpreadOutcome::Progressed)
}

/// Draws the next position, or `None` when the leftover mass keeps the
/// walker in place.
///
/// Successor `w` of `v` is chosen with probability
/// `(1 / |succ(v)|) * min(1, |succ(v)| / |pred(w)|)`.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "transition weights are probabilities"
)]
pub(super) fn metropolis_hastings_step(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    successors: &[VertexId],
) -> Option<VertexId> {
    let degree = successors.len() as f64;
    let draw: f64 = session.rng.sample(Standard);
    let mut cumulative = 0.0;
    for &candidate in successors {
        let in_degree = parent.predecessors(candidate).len().max(1) as f64;
        cumulative += (1.0 / degree) * (degree / in_degree).min(1.0);
        if draw < cumulative {
            return Some(candidate);
        }
    }
    None
}

/// Moves the walker to a fresh start after too many non-discovering steps.
fn rehome(
    session: &mut GrowthSession,
    parent: &ParentView<'_>,
    permutation: &mut Permutation,
) -> Result<SpreadOutcome, SamplingError> {
    let frontier: Vec<VertexId> = session
        .sampled
        .vertices()
        .flat_map(|vertex| parent.successors(vertex))
        .filter(|candidate| !session.sampled.contains_vertex(*candidate))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let target = match frontier.choose(&mut session.rng) {
        Some(&vertex) => vertex,
        None => match permutation.next_unsampled(&session.sampled) {
            Some(vertex) => vertex,
            None => return Ok(SpreadOutcome::Exhausted),
        },
    };
    tracing::debug!(
        vertex = %target,
        stale_steps = session.stale_steps,
        "random walk rehomed"
    );
    materialize(session, parent, target, None)?;
    Ok(SpreadOutcome::Progressed)
}

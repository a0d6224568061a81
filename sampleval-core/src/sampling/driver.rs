//! The jump/spread state machine shared by every sampling policy.

use rand::{Rng, distributions::Standard};
use tracing::{debug, info, instrument};

use crate::{
    error::{Result, SamplingError},
    graph::Graph,
};

use super::{
    bfs, forest_fire,
    materialize::{ParentView, materialize},
    params::{AchievedStats, SamplerParams, target_vertex_count},
    policy::SamplingPolicy,
    rng::Permutation,
    session::{GrowthSession, SessionSnapshot},
    walk,
};

/// Result of one attempted spread move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum SpreadOutcome {
    /// The move sampled, queued or moved something.
    Progressed,
    /// Nothing to spread to; the driver jumps instead.
    Failed,
    /// No unsampled vertex is reachable at all.
    Exhausted,
}

/// Grows a sample of a parent graph towards a target vertex fraction.
///
/// Each step either drains the frontier queue, takes a spread move chosen by
/// the [`SamplingPolicy`], or jumps to the next unsampled vertex of a seeded
/// permutation. The sample keeps every parent edge between sampled vertices.
///
/// # Examples
/// ```
/// use sampleval_core::{BfsConfig, EdgeType, Graph, Sampler, SamplerParams, SamplingPolicy, VertexId};
///
/// let mut parent = Graph::new(EdgeType::Undirected);
/// for id in 0..9 {
///     parent.connect(VertexId::new(id), VertexId::new(id + 1));
/// }
/// let params = SamplerParams::new(0.5, 0.9)
///     .expect("parameters must be valid")
///     .with_seed(7);
/// let mut sampler = Sampler::new(SamplingPolicy::Bfs(BfsConfig::full_frontier()), params);
/// let stats = sampler.sample_graph(&parent).expect("sampling must succeed");
/// assert_eq!(sampler.sampled_graph().vertex_count(), 5);
/// assert_eq!(stats.achieved_alpha, 0.5);
/// ```
#[derive(Clone, Debug)]
pub struct Sampler {
    policy: SamplingPolicy,
    session: GrowthSession,
}

impl Sampler {
    /// Creates a sampler with a fresh growth session.
    #[must_use]
    pub fn new(policy: SamplingPolicy, params: SamplerParams) -> Self {
        Self::from_session(policy, GrowthSession::new(params))
    }

    /// Resumes growth of an existing session under `policy`.
    #[must_use]
    pub fn from_session(policy: SamplingPolicy, mut session: GrowthSession) -> Self {
        session.burns = matches!(policy, SamplingPolicy::ForestFire(_));
        Self { policy, session }
    }

    /// Releases the growth session.
    #[must_use]
    pub fn into_session(self) -> GrowthSession {
        self.session
    }

    /// The spread policy in use.
    #[must_use]
    pub fn policy(&self) -> &SamplingPolicy {
        &self.policy
    }

    /// The growth session.
    #[must_use]
    pub fn session(&self) -> &GrowthSession {
        &self.session
    }

    /// The sample grown so far.
    #[must_use]
    pub fn sampled_graph(&self) -> &Graph {
        self.session.sampled()
    }

    /// Consumes the sampler and returns the sample.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.session.into_graph()
    }

    /// Changes the target fraction without touching the sample.
    ///
    /// Lowering the target never removes vertices; raising it lets the next
    /// [`Sampler::sample_graph`] call resume growth.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidAlpha`] unless `alpha` lies in `(0, 1]`.
    pub fn change_alpha(&mut self, alpha: f64) -> Result<()> {
        self.session.params.set_alpha(alpha)?;
        self.session.bump();
        Ok(())
    }

    /// Captures the growth session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Rolls the growth session back to `snapshot`.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        let burns = self.session.burns;
        self.session.restore(snapshot);
        self.session.burns = burns;
    }

    /// Grows the sample until it covers `alpha` of `parent`'s vertices or no
    /// unsampled vertex remains.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidGraph`] when `parent` has no vertex or
    /// no edge, and [`SamplingError::Graph`] if copying an edge fails.
    #[instrument(
        name = "sampler.sample_graph",
        err,
        skip(self, parent),
        fields(
            policy = self.policy.name(),
            vertices = parent.vertex_count(),
            edges = parent.edge_count(),
            alpha = self.session.params.alpha(),
            mixture_ratio = self.session.params.mixture_ratio(),
        ),
    )]
    pub fn sample_graph(&mut self, parent: &Graph) -> Result<AchievedStats> {
        let vertex_count = parent.vertex_count();
        if vertex_count == 0 || parent.edge_count() == 0 {
            return Err(SamplingError::InvalidGraph {
                vertices: vertex_count,
                edges: parent.edge_count(),
            });
        }
        let target = target_vertex_count(self.session.params.alpha(), vertex_count);
        let view = ParentView::new(parent, self.session.params.edge_type());
        let mut permutation = Permutation::new(parent, self.session.seed);
        let mixture_ratio = self.session.params.mixture_ratio();
        let (jumps_before, spreads_before) = (self.session.jump_moves, self.session.spread_moves);

        while self.session.sampled.vertex_count() < target {
            if let Some(entry) = self.session.dequeue() {
                materialize(&mut self.session, &view, entry.vertex, entry.via)?;
                continue;
            }
            let draw: f64 = self.session.rng.sample(Standard);
            if draw < mixture_ratio {
                match self.spread(&view, &mut permutation)? {
                    SpreadOutcome::Progressed => {
                        self.session.spread_moves += 1;
                        self.session.bump();
                        continue;
                    }
                    SpreadOutcome::Failed => {}
                    SpreadOutcome::Exhausted => break,
                }
            }
            let Some(vertex) = permutation.next_unsampled(&self.session.sampled) else {
                debug!(target, "jump permutation exhausted");
                break;
            };
            materialize(&mut self.session, &view, vertex, None)?;
            self.session.jump_moves += 1;
            self.session.bump();
        }

        record_moves(
            self.session.jump_moves - jumps_before,
            self.session.spread_moves - spreads_before,
        );
        let stats = self.achieved(vertex_count);
        info!(
            sampled = self.session.sampled.vertex_count(),
            target,
            achieved_alpha = stats.achieved_alpha,
            achieved_mixture_ratio = stats.achieved_mixture_ratio,
            "sampling completed"
        );
        Ok(stats)
    }

    fn spread(
        &mut self,
        view: &ParentView<'_>,
        permutation: &mut Permutation,
    ) -> Result<SpreadOutcome> {
        Ok(match &self.policy {
            SamplingPolicy::RandomNode => SpreadOutcome::Failed,
            SamplingPolicy::Bfs(config) => bfs::spread(&mut self.session, view, *config),
            SamplingPolicy::RandomWalk(config) => {
                walk::spread(&mut self.session, view, *config, permutation)?
            }
            SamplingPolicy::ForestFire(config) => {
                forest_fire::spread(&mut self.session, view, *config)
            }
        })
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "vertex counts become a fraction"
    )]
    fn achieved(&self, parent_vertices: usize) -> AchievedStats {
        AchievedStats {
            achieved_alpha: self.session.sampled.vertex_count() as f64 / parent_vertices as f64,
            achieved_mixture_ratio: self.session.achieved_mixture_ratio(),
        }
    }
}

#[cfg(feature = "metrics")]
fn record_moves(jumps: u64, spreads: u64) {
    metrics::counter!("sampler_jump_moves").increment(jumps);
    metrics::counter!("sampler_spread_moves").increment(spreads);
}

#[cfg(not(feature = "metrics"))]
fn record_moves(_jumps: u64, _spreads: u64) {}

//! Owned growth state carried by a sampler across calls.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::rngs::SmallRng;

use crate::graph::{Graph, VertexId};

use super::{
    params::SamplerParams,
    rng::{MOVE_STREAM, stream_rng},
};

/// A queued vertex together with the sampled vertex that discovered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct FrontierEntry {
    pub(super) vertex: VertexId,
    pub(super) via: Option<VertexId>,
}

/// Growth state of one sampler.
///
/// The session owns the sample under construction. Samples only ever grow:
/// raising the target with [`crate::Sampler::change_alpha`] resumes from the
/// stored frontier, so a smaller sample is always contained in a larger one
/// grown by the same session. Every mutation bumps [`GrowthSession::version`].
#[derive(Clone, Debug)]
pub struct GrowthSession {
    pub(super) params: SamplerParams,
    pub(super) seed: u64,
    pub(super) sampled: Graph,
    pub(super) order: Vec<VertexId>,
    pub(super) queue: VecDeque<FrontierEntry>,
    pub(super) queued: HashSet<VertexId>,
    pub(super) expansion_cursor: usize,
    pub(super) burning: VecDeque<VertexId>,
    pub(super) burns: bool,
    pub(super) last_visited: Option<VertexId>,
    pub(super) stale_steps: usize,
    pub(super) discovered_by: HashMap<VertexId, VertexId>,
    pub(super) jump_moves: u64,
    pub(super) spread_moves: u64,
    pub(super) rng: SmallRng,
    pub(super) version: u64,
}

/// Captured [`GrowthSession`] state for [`crate::Sampler::restore`].
#[derive(Clone, Debug)]
pub struct SessionSnapshot(GrowthSession);

impl SessionSnapshot {
    /// Version of the session at capture time.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.0.version
    }
}

impl GrowthSession {
    /// Starts an empty session. Without a caller seed one is drawn from the
    /// thread-local generator and kept for the session's lifetime.
    #[must_use]
    pub fn new(params: SamplerParams) -> Self {
        let seed = params.seed().unwrap_or_else(rand::random::<u64>);
        Self {
            params,
            seed,
            sampled: Graph::new(params.edge_type()),
            order: Vec::new(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
            expansion_cursor: 0,
            burning: VecDeque::new(),
            burns: false,
            last_visited: None,
            stale_steps: 0,
            discovered_by: HashMap::new(),
            jump_moves: 0,
            spread_moves: 0,
            rng: stream_rng(seed, MOVE_STREAM),
            version: 0,
        }
    }

    /// Parameters the session grows towards.
    #[must_use]
    pub fn params(&self) -> &SamplerParams {
        &self.params
    }

    /// Resolved seed of every random stream in this session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The sample grown so far.
    #[must_use]
    pub fn sampled(&self) -> &Graph {
        &self.sampled
    }

    /// Consumes the session, keeping only the sample.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.sampled
    }

    /// Vertices in the order they joined the sample.
    #[must_use]
    pub fn insertion_order(&self) -> &[VertexId] {
        &self.order
    }

    /// The sampled vertex whose spread discovered `vertex`, if any.
    ///
    /// Vertices reached by a jump or a rehome have no discoverer.
    #[must_use]
    pub fn discovered_via(&self, vertex: VertexId) -> Option<VertexId> {
        self.discovered_by.get(&vertex).copied()
    }

    /// Jump moves taken across all calls.
    #[must_use]
    pub fn jump_moves(&self) -> u64 {
        self.jump_moves
    }

    /// Spread moves taken across all calls.
    #[must_use]
    pub fn spread_moves(&self) -> u64 {
        self.spread_moves
    }

    /// Share of spread moves among all moves taken, `0.0` before any move.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "move counters become a ratio"
    )]
    pub fn achieved_mixture_ratio(&self) -> f64 {
        let total = self.jump_moves + self.spread_moves;
        if total == 0 {
            0.0
        } else {
            self.spread_moves as f64 / total as f64
        }
    }

    /// Monotonic mutation counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Captures the full session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot(self.clone())
    }

    /// Rolls the session back to `snapshot`.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        *self = snapshot.0;
    }

    pub(super) fn bump(&mut self) {
        self.version += 1;
    }

    pub(super) fn enqueue(&mut self, vertex: VertexId, via: Option<VertexId>) -> bool {
        if self.sampled.contains_vertex(vertex) || !self.queued.insert(vertex) {
            return false;
        }
        self.queue.push_back(FrontierEntry { vertex, via });
        self.bump();
        true
    }

    pub(super) fn dequeue(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(&entry.vertex);
        self.bump();
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SamplerParams {
        SamplerParams::new(0.5, 0.5)
            .expect("valid parameters")
            .with_seed(3)
    }

    #[test]
    fn enqueue_rejects_duplicates_and_sampled_vertices() {
        let mut session = GrowthSession::new(params());
        session.sampled.add_vertex(VertexId::new(1));

        assert!(session.enqueue(VertexId::new(2), None));
        assert!(!session.enqueue(VertexId::new(2), Some(VertexId::new(1))));
        assert!(!session.enqueue(VertexId::new(1), None));
        assert_eq!(session.queue.len(), 1);

        let entry = session.dequeue().expect("one entry queued");
        assert_eq!(entry.vertex, VertexId::new(2));
        assert!(session.enqueue(VertexId::new(2), None));
    }

    #[test]
    fn snapshot_restores_state_and_version() {
        let mut session = GrowthSession::new(params());
        let snapshot = session.snapshot();
        session.enqueue(VertexId::new(4), None);
        session.spread_moves = 3;
        assert!(session.version() > snapshot.version());

        session.restore(snapshot);
        assert_eq!(session.version(), 0);
        assert!(session.queue.is_empty());
        assert_eq!(session.spread_moves(), 0);
    }

    #[test]
    fn mixture_ratio_is_zero_without_moves() {
        let session = GrowthSession::new(params());
        assert_eq!(session.achieved_mixture_ratio(), 0.0);
    }

    #[test]
    fn unseeded_sessions_resolve_a_seed() {
        let params = SamplerParams::new(0.5, 0.5).expect("valid parameters");
        let session = GrowthSession::new(params);
        let clone = session.clone();
        assert_eq!(session.seed(), clone.seed());
    }
}

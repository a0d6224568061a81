//! Seed derivation and permutation helpers for the samplers.
//!
//! Every sampler derives independent random streams from one base seed so the
//! vertex permutation used by jump moves never depends on how many draws the
//! spread moves consumed.

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::graph::{Graph, VertexId};

/// SplitMix64 increment (the 64-bit golden ratio) used for stream derivation.
const STREAM_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Stream feeding jump/spread decisions and spread-move choices.
pub(super) const MOVE_STREAM: u64 = 0;
/// Stream feeding the jump permutation.
pub(super) const SHUFFLE_STREAM: u64 = 1;

/// Derives an independent seed for `stream` from `base_seed`.
///
/// The experiment runner uses the same mixer to give every job its own seed.
#[inline]
#[must_use]
pub fn mix_seed(base_seed: u64, stream: u64) -> u64 {
    splitmix64(base_seed ^ (stream.wrapping_add(1)).wrapping_mul(STREAM_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(STREAM_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

pub(super) fn stream_rng(base_seed: u64, stream: u64) -> SmallRng {
    SmallRng::seed_from_u64(mix_seed(base_seed, stream))
}

/// Seeded shuffle of the parent's vertices consumed by jump moves.
///
/// Rebuilt at the start of every sampling call; already-sampled vertices are
/// skipped, so resuming after a re-target walks the same order.
pub(super) struct Permutation {
    order: Vec<VertexId>,
    cursor: usize,
}

impl Permutation {
    pub(super) fn new(parent: &Graph, base_seed: u64) -> Self {
        let mut order: Vec<VertexId> = parent.vertices().collect();
        order.shuffle(&mut stream_rng(base_seed, SHUFFLE_STREAM));
        Self { order, cursor: 0 }
    }

    /// Returns the next vertex not yet present in `sampled`.
    pub(super) fn next_unsampled(&mut self, sampled: &Graph) -> Option<VertexId> {
        while let Some(&vertex) = self.order.get(self.cursor) {
            self.cursor += 1;
            if !sampled.contains_vertex(vertex) {
                return Some(vertex);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_distinct_and_stable() {
        assert_eq!(mix_seed(7, MOVE_STREAM), mix_seed(7, MOVE_STREAM));
        assert_ne!(mix_seed(7, MOVE_STREAM), mix_seed(7, SHUFFLE_STREAM));
        assert_ne!(mix_seed(7, MOVE_STREAM), mix_seed(8, MOVE_STREAM));
    }

    #[test]
    fn permutation_skips_sampled_vertices() {
        let mut parent = Graph::new(crate::EdgeType::Undirected);
        for id in 0..5 {
            parent.connect(VertexId::new(id), VertexId::new(id + 1));
        }
        let mut sampled = Graph::new(crate::EdgeType::Undirected);
        sampled.add_vertex(VertexId::new(2));
        sampled.add_vertex(VertexId::new(4));

        let mut permutation = Permutation::new(&parent, 11);
        let mut drawn = Vec::new();
        while let Some(vertex) = permutation.next_unsampled(&sampled) {
            drawn.push(vertex);
        }
        drawn.sort();
        assert_eq!(drawn, [0, 1, 3, 5].map(VertexId::new).to_vec());
    }
}

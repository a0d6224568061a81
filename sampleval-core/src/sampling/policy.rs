//! Spread-move selection and the per-variant configuration types.

use std::num::NonZeroUsize;

use crate::error::SamplingError;

/// Default number of non-discovering walk steps before the walker rehomes.
pub const DEFAULT_RERUN_MAX: usize = 200;
/// Default forward burning probability of the forest-fire sampler.
pub const DEFAULT_FORWARD_BURN_PROBABILITY: f64 = 0.7;
/// Default ratio between backward and forward burning probabilities.
pub const DEFAULT_BACKWARD_BURN_MULTIPLIER: f64 = 0.2;

/// Selects the spread move a [`crate::Sampler`] mixes with uniform jumps.
#[derive(Clone, Debug, PartialEq)]
pub enum SamplingPolicy {
    /// Jumps only; spread moves always fall back to a jump.
    RandomNode,
    /// Breadth-first expansion around the sampled vertices.
    Bfs(BfsConfig),
    /// Random walk from the most recently visited vertex.
    RandomWalk(WalkConfig),
    /// Probabilistic fire spreading along out- and in-edges.
    ForestFire(ForestFireConfig),
}

impl SamplingPolicy {
    /// Short identifier used in logs and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RandomNode => "random_node",
            Self::Bfs(config) if config.bounded => "bfs_bounded",
            Self::Bfs(_) => "bfs",
            Self::RandomWalk(config) => match config.transition {
                WalkTransition::Uniform => "random_walk",
                WalkTransition::MetropolisHastings => "random_walk_mh",
            },
            Self::ForestFire(_) => "forest_fire",
        }
    }
}

/// Breadth-first spread configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BfsConfig {
    bounded: bool,
    max_degree: Option<NonZeroUsize>,
}

impl BfsConfig {
    /// Every spread queues the unsampled successors of all sampled vertices.
    #[must_use]
    pub const fn full_frontier() -> Self {
        Self {
            bounded: false,
            max_degree: None,
        }
    }

    /// Every spread expands one not-yet-expanded sampled vertex.
    #[must_use]
    pub const fn bounded() -> Self {
        Self {
            bounded: true,
            max_degree: None,
        }
    }

    /// Caps the incident edges followed per expanded vertex.
    ///
    /// Implies bounded expansion.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidParameters`] when `max_degree` is zero.
    pub fn with_max_degree(self, max_degree: usize) -> Result<Self, SamplingError> {
        let max_degree =
            NonZeroUsize::new(max_degree).ok_or_else(|| SamplingError::InvalidParameters {
                reason: "max_degree must be at least 1".into(),
            })?;
        Ok(Self {
            bounded: true,
            max_degree: Some(max_degree),
        })
    }

    /// Whether spreads expand one vertex at a time.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Fan-out cap per expanded vertex.
    #[must_use]
    pub const fn max_degree(&self) -> Option<NonZeroUsize> {
        self.max_degree
    }
}

/// Transition kernel used by the random walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalkTransition {
    /// Successor drawn uniformly.
    #[default]
    Uniform,
    /// Metropolis–Hastings correction towards a uniform vertex distribution.
    MetropolisHastings,
}

/// Random-walk spread configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkConfig {
    transition: WalkTransition,
    rerun_max: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::uniform()
    }
}

impl WalkConfig {
    /// Uniform successor selection.
    #[must_use]
    pub const fn uniform() -> Self {
        Self {
            transition: WalkTransition::Uniform,
            rerun_max: DEFAULT_RERUN_MAX,
        }
    }

    /// Metropolis–Hastings successor selection.
    #[must_use]
    pub const fn metropolis_hastings() -> Self {
        Self {
            transition: WalkTransition::MetropolisHastings,
            rerun_max: DEFAULT_RERUN_MAX,
        }
    }

    /// Sets how many consecutive non-discovering steps trigger a rehome.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidParameters`] when `rerun_max` is zero.
    pub fn with_rerun_max(self, rerun_max: usize) -> Result<Self, SamplingError> {
        if rerun_max == 0 {
            return Err(SamplingError::InvalidParameters {
                reason: "rerun_max must be at least 1".into(),
            });
        }
        Ok(Self { rerun_max, ..self })
    }

    /// Transition kernel.
    #[must_use]
    pub const fn transition(&self) -> WalkTransition {
        self.transition
    }

    /// Rehome threshold.
    #[must_use]
    pub const fn rerun_max(&self) -> usize {
        self.rerun_max
    }
}

/// Forest-fire spread configuration.
///
/// # Examples
/// ```
/// use sampleval_core::ForestFireConfig;
///
/// let config = ForestFireConfig::new(0.5, 0.4).expect("probabilities are valid");
/// assert!((config.backward_burn_probability() - 0.2).abs() < 1e-12);
/// assert!(ForestFireConfig::new(1.0, 0.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForestFireConfig {
    forward_burn_probability: f64,
    backward_burn_multiplier: f64,
}

impl Default for ForestFireConfig {
    fn default() -> Self {
        Self {
            forward_burn_probability: DEFAULT_FORWARD_BURN_PROBABILITY,
            backward_burn_multiplier: DEFAULT_BACKWARD_BURN_MULTIPLIER,
        }
    }
}

impl ForestFireConfig {
    /// Validates `p_fb ∈ [0, 1)` and `p_bb = p_fb × multiplier ∈ [0, 1]`.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidParameters`] when either probability
    /// leaves its range.
    #[expect(clippy::float_arithmetic, reason = "derived burn probability")]
    pub fn new(
        forward_burn_probability: f64,
        backward_burn_multiplier: f64,
    ) -> Result<Self, SamplingError> {
        if !(0.0..1.0).contains(&forward_burn_probability) {
            return Err(SamplingError::InvalidParameters {
                reason: format!(
                    "forward burn probability must lie in [0, 1) (got {forward_burn_probability})"
                ),
            });
        }
        let backward = forward_burn_probability * backward_burn_multiplier;
        if !(0.0..=1.0).contains(&backward) {
            return Err(SamplingError::InvalidParameters {
                reason: format!("backward burn probability must lie in [0, 1] (got {backward})"),
            });
        }
        Ok(Self {
            forward_burn_probability,
            backward_burn_multiplier,
        })
    }

    /// Probability `p_fb` of igniting one more out-neighbour.
    #[must_use]
    pub const fn forward_burn_probability(&self) -> f64 {
        self.forward_burn_probability
    }

    /// Multiplier applied to `p_fb` for the backward pass.
    #[must_use]
    pub const fn backward_burn_multiplier(&self) -> f64 {
        self.backward_burn_multiplier
    }

    /// Probability `p_bb` of igniting one more in-neighbour.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "derived burn probability")]
    pub fn backward_burn_probability(&self) -> f64 {
        self.forward_burn_probability * self.backward_burn_multiplier
    }
}

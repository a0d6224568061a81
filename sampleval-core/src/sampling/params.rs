//! Parameter handling shared by every sampling policy.

use crate::{
    error::SamplingError,
    graph::EdgeType,
};

/// Construction parameters shared by every sampler.
///
/// # Examples
/// ```
/// use sampleval_core::{EdgeType, SamplerParams};
///
/// let params = SamplerParams::new(0.25, 0.8)
///     .expect("parameters must be valid")
///     .with_seed(42)
///     .with_edge_type(EdgeType::Directed);
/// assert_eq!(params.alpha(), 0.25);
/// assert_eq!(params.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerParams {
    alpha: f64,
    mixture_ratio: f64,
    seed: Option<u64>,
    edge_type: EdgeType,
}

impl SamplerParams {
    /// Creates parameters for a sample covering `alpha` of the parent's
    /// vertices, taking spread moves with probability `mixture_ratio`.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidAlpha`] unless `alpha` lies in `(0, 1]`
    /// and [`SamplingError::InvalidMixtureRatio`] unless `mixture_ratio` lies
    /// in `[0, 1]`.
    pub fn new(alpha: f64, mixture_ratio: f64) -> Result<Self, SamplingError> {
        Ok(Self {
            alpha: validate_alpha(alpha)?,
            mixture_ratio: validate_mixture_ratio(mixture_ratio)?,
            seed: None,
            edge_type: EdgeType::Undirected,
        })
    }

    /// Seeds the sampler so runs on the same parent are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Selects directed or undirected edge semantics for the sample.
    #[must_use]
    pub fn with_edge_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    /// Target fraction of parent vertices.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Probability of choosing a spread move over a jump.
    #[must_use]
    pub fn mixture_ratio(&self) -> f64 {
        self.mixture_ratio
    }

    /// Seed supplied by the caller, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Edge semantics of the produced sample.
    #[must_use]
    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub(super) fn set_alpha(&mut self, alpha: f64) -> Result<(), SamplingError> {
        self.alpha = validate_alpha(alpha)?;
        Ok(())
    }
}

/// Fraction of the parent reached and share of spread moves actually taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AchievedStats {
    /// Sampled vertex count divided by parent vertex count.
    pub achieved_alpha: f64,
    /// Spread moves divided by all moves; `0.0` before any move.
    pub achieved_mixture_ratio: f64,
}

fn validate_alpha(alpha: f64) -> Result<f64, SamplingError> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(alpha)
    } else {
        Err(SamplingError::InvalidAlpha { got: alpha })
    }
}

fn validate_mixture_ratio(ratio: f64) -> Result<f64, SamplingError> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(SamplingError::InvalidMixtureRatio { got: ratio })
    }
}

/// Guards `ceil` against products such as `0.3 * 10 = 3.0000000000000004`.
const TARGET_EPSILON: f64 = 1e-9;

/// Number of vertices a sample of `alpha` must reach in a parent of
/// `vertex_count` vertices.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_arithmetic,
    reason = "target sizes are derived from a floating-point fraction"
)]
pub(super) fn target_vertex_count(alpha: f64, vertex_count: usize) -> usize {
    let raw = (alpha * vertex_count as f64 - TARGET_EPSILON).ceil();
    (raw.max(1.0) as usize).min(vertex_count)
}

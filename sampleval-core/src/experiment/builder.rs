//! Builder utilities for configuring experiments.
//!
//! Collects the sampler policy, the mixture-ratio sweep and the metrics to
//! validate, then checks them all before constructing an [`Experiment`].

use std::{num::NonZeroUsize, time::Duration};

use crate::{
    error::ExperimentError,
    graph::EdgeType,
    metrics::MetricKind,
    sampling::{BfsConfig, SamplerParams, SamplingPolicy},
};

use super::{pools::PoolTiers, runner::Experiment};

/// Default target fraction of population vertices per sample.
pub const DEFAULT_ALPHA: f64 = 0.1;
/// Default share of each metric's vertices compared as the top-K set.
pub const DEFAULT_TOP_K_FRACTION: f64 = 0.1;
/// Default time allowed for one batch of replicas.
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(600);
/// Longest accepted batch timeout: thirty days.
pub const MAX_BATCH_TIMEOUT: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Configures and constructs [`Experiment`] instances.
///
/// # Examples
/// ```
/// use sampleval_core::{ExperimentBuilder, MetricKind, SamplingPolicy};
///
/// let experiment = ExperimentBuilder::new()
///     .with_policy(SamplingPolicy::RandomNode)
///     .with_mixture_ratios([0.0, 0.5])
///     .with_replicas(2)
///     .with_metrics([MetricKind::Degree])
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(experiment.mixture_ratios(), &[0.0, 0.5]);
/// assert_eq!(experiment.replicas().get(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ExperimentBuilder {
    policy: SamplingPolicy,
    alpha: f64,
    mixture_ratios: Vec<f64>,
    replicas: usize,
    metrics: Vec<MetricKind>,
    seed: u64,
    top_k_fraction: f64,
    batch_timeout: Duration,
    pool_tiers: PoolTiers,
    edge_type: Option<EdgeType>,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            policy: SamplingPolicy::Bfs(BfsConfig::full_frontier()),
            alpha: DEFAULT_ALPHA,
            mixture_ratios: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            replicas: 3,
            metrics: MetricKind::ALL.to_vec(),
            seed: 0,
            top_k_fraction: DEFAULT_TOP_K_FRACTION,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
            pool_tiers: PoolTiers::default(),
            edge_type: None,
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use sampleval_core::ExperimentBuilder;
    ///
    /// let builder = ExperimentBuilder::new();
    /// assert_eq!(builder.replicas(), 3);
    /// assert_eq!(builder.mixture_ratios().len(), 5);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the sampling policy every job uses.
    #[must_use]
    pub fn with_policy(mut self, policy: SamplingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the target fraction of population vertices per sample.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the mixture ratios swept by the experiment, one batch each.
    #[must_use]
    pub fn with_mixture_ratios(mut self, ratios: impl IntoIterator<Item = f64>) -> Self {
        self.mixture_ratios = ratios.into_iter().collect();
        self
    }

    /// Sets the number of independent samples per mixture ratio.
    #[must_use]
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Selects the metrics compared for every sample.
    ///
    /// Repeated kinds are kept once, in first-seen order.
    #[must_use]
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Sets the base seed from which every job seed is derived.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the share of vertices compared by precision and recall.
    #[must_use]
    pub fn with_top_k_fraction(mut self, fraction: f64) -> Self {
        self.top_k_fraction = fraction;
        self
    }

    /// Sets the time each batch of replicas may take.
    #[must_use]
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Sets the worker pool sizes.
    #[must_use]
    pub fn with_pool_tiers(mut self, tiers: PoolTiers) -> Self {
        self.pool_tiers = tiers;
        self
    }

    /// Overrides the sampler's edge semantics, which otherwise follow the
    /// population graph.
    #[must_use]
    pub fn with_edge_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = Some(edge_type);
        self
    }

    /// Returns the configured mixture ratios.
    #[must_use]
    pub fn mixture_ratios(&self) -> &[f64] {
        &self.mixture_ratios
    }

    /// Returns the configured replica count.
    #[must_use]
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`ExperimentError::Sampling`] when `alpha` or a mixture ratio
    /// is out of range, and [`ExperimentError::InvalidConfig`] when the sweep
    /// or metric list is empty, the replica count is zero, the top-K fraction
    /// lies outside `(0, 1]` or the batch timeout is zero or exceeds
    /// [`MAX_BATCH_TIMEOUT`].
    ///
    /// # Examples
    /// ```
    /// use sampleval_core::ExperimentBuilder;
    ///
    /// let err = ExperimentBuilder::new()
    ///     .with_replicas(0)
    ///     .build()
    ///     .expect_err("zero replicas are rejected");
    /// assert_eq!(err.code().as_str(), "EXPERIMENT_INVALID_CONFIG");
    /// ```
    pub fn build(self) -> Result<Experiment, ExperimentError> {
        if self.mixture_ratios.is_empty() {
            return Err(invalid("at least one mixture ratio is required"));
        }
        for &ratio in &self.mixture_ratios {
            SamplerParams::new(self.alpha, ratio)?;
        }
        let replicas = NonZeroUsize::new(self.replicas)
            .ok_or_else(|| invalid("replica count must be positive"))?;

        let mut metrics = Vec::with_capacity(self.metrics.len());
        for kind in self.metrics {
            if !metrics.contains(&kind) {
                metrics.push(kind);
            }
        }
        if metrics.is_empty() {
            return Err(invalid("at least one metric is required"));
        }
        if !(self.top_k_fraction > 0.0 && self.top_k_fraction <= 1.0) {
            return Err(invalid(format!(
                "top-k fraction must lie in (0, 1] (got {})",
                self.top_k_fraction
            )));
        }
        if self.batch_timeout.is_zero() {
            return Err(invalid("batch timeout must be positive"));
        }
        if self.batch_timeout > MAX_BATCH_TIMEOUT {
            return Err(invalid(format!(
                "batch timeout must not exceed {}s (got {}s)",
                MAX_BATCH_TIMEOUT.as_secs(),
                self.batch_timeout.as_secs()
            )));
        }

        Ok(Experiment {
            policy: self.policy,
            alpha: self.alpha,
            mixture_ratios: self.mixture_ratios,
            replicas,
            metrics,
            seed: self.seed,
            top_k_fraction: self.top_k_fraction,
            batch_timeout: self.batch_timeout,
            pool_tiers: self.pool_tiers,
            edge_type: self.edge_type,
        })
    }
}

fn invalid(reason: impl Into<String>) -> ExperimentError {
    ExperimentError::InvalidConfig {
        reason: reason.into(),
    }
}

//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?`.

use sampleval_core::{MetricsError, SamplingError, StatsError};
use sampleval_providers_synthetic::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Sampler parameters were rejected or sampling failed.
    #[error("sampling failed: {0}")]
    Sampling(#[from] SamplingError),
    /// A metric analyzer failed.
    #[error("metric computation failed: {0}")]
    Metrics(#[from] MetricsError),
    /// A comparison statistic failed.
    #[error("statistic failed: {0}")]
    Stats(#[from] StatsError),
    /// A zero value was passed where a positive size was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}

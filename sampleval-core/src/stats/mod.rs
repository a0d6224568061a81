//! Statistical validation engine.
//!
//! Pure functions comparing two numeric series or two keyed maps. Numerical
//! degeneracy is resolved by documented sentinel policies; only precondition
//! violations such as mismatched lengths produce a [`crate::StatsError`].

mod compare;
mod correlation;
mod divergence;
mod ks;
mod precision_recall;
mod rank;

pub use self::{
    compare::{MetricComparison, compare_metric_maps},
    correlation::{KENDALL_UNDEFINED, kendall_tau, pearson, spearman},
    divergence::{KL_SMOOTHING, kl_divergence},
    ks::{KS_UNDERFLOW_THRESHOLD, KsFailure, KsFailureCode, ks_p_value, ks_statistic, ks_test},
    precision_recall::{PrecisionRecall, precision_recall, top_k},
    rank::{RANK_TIE_TOLERANCE, average_ranks},
};

#[cfg(test)]
mod tests;

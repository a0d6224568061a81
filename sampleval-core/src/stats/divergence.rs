//! Smoothed Kullback–Leibler divergence between mass maps.

use std::collections::{BTreeMap, BTreeSet};

/// Probability assigned to keys missing from one side.
pub const KL_SMOOTHING: f64 = 1e-7;

/// `KL(a ‖ b)` over the union of both key sets.
///
/// Each side is normalised, then every missing key receives
/// [`KL_SMOOTHING`] and the present keys give up
/// `KL_SMOOTHING × missing / present` each, keeping the total at one. A side
/// without positive finite mass yields `NaN`.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use sampleval_core::stats::kl_divergence;
///
/// let a: BTreeMap<&str, f64> = [("x", 3.0), ("y", 1.0)].into();
/// assert_eq!(kl_divergence(&a, &a), 0.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "information-theoretic sum")]
pub fn kl_divergence<K: Ord>(a: &BTreeMap<K, f64>, b: &BTreeMap<K, f64>) -> f64 {
    let union: BTreeSet<&K> = a.keys().chain(b.keys()).collect();
    let (Some(p), Some(q)) = (smoothed(a, &union), smoothed(b, &union)) else {
        return f64::NAN;
    };
    p.iter()
        .zip(&q)
        .map(|(&p, &q)| if p == 0.0 { 0.0 } else { p * (p / q).ln() })
        .sum()
}

/// Smoothed probabilities of `masses` in `union` order.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "probability smoothing"
)]
fn smoothed<K: Ord>(masses: &BTreeMap<K, f64>, union: &BTreeSet<&K>) -> Option<Vec<f64>> {
    let total: f64 = masses.values().sum();
    if masses.is_empty() || !total.is_finite() || total <= 0.0 {
        return None;
    }
    let missing = union.len() - masses.len();
    let deduction = KL_SMOOTHING * missing as f64 / masses.len() as f64;
    Some(
        union
            .iter()
            .map(|key| {
                masses
                    .get(*key)
                    .map_or(KL_SMOOTHING, |mass| mass / total - deduction)
            })
            .collect(),
    )
}

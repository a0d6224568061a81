//! Precision and recall over top-K vertex sets.

use std::collections::{BTreeMap, BTreeSet};

/// Overlap of a test set with a reference set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecisionRecall {
    /// `|reference ∩ test| / |test|`, `NaN` when `test` is empty.
    pub precision: f64,
    /// `|reference ∩ test| / |reference|`, `NaN` when `reference` is empty.
    pub recall: f64,
}

/// Compares `test` against `reference`.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use sampleval_core::stats::precision_recall;
///
/// let reference: BTreeSet<u32> = [1, 2, 3, 4].into();
/// let test: BTreeSet<u32> = [3, 4, 5].into();
/// let scores = precision_recall(&reference, &test);
/// assert!((scores.precision - 2.0 / 3.0).abs() < 1e-12);
/// assert_eq!(scores.recall, 0.5);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "set overlap ratios"
)]
pub fn precision_recall<T: Ord>(reference: &BTreeSet<T>, test: &BTreeSet<T>) -> PrecisionRecall {
    let overlap = reference.intersection(test).count() as f64;
    let ratio = |denominator: usize| {
        if denominator == 0 {
            f64::NAN
        } else {
            overlap / denominator as f64
        }
    };
    PrecisionRecall {
        precision: ratio(test.len()),
        recall: ratio(reference.len()),
    }
}

/// The `k` keys with the largest values.
///
/// Ties are broken towards smaller keys; NaN values never qualify.
#[must_use]
pub fn top_k<K: Ord + Clone>(values: &BTreeMap<K, f64>, k: usize) -> BTreeSet<K> {
    let mut ranked: Vec<(&K, f64)> = values
        .iter()
        .filter(|(_, value)| !value.is_nan())
        .map(|(key, &value)| (key, value))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(k)
        .map(|(key, _)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sets_score_one() {
        let set: BTreeSet<u64> = (0..5).collect();
        assert_eq!(
            precision_recall(&set, &set),
            PrecisionRecall {
                precision: 1.0,
                recall: 1.0
            }
        );
    }

    #[test]
    fn disjoint_sets_score_zero() {
        let reference: BTreeSet<u64> = (0..5).collect();
        let test: BTreeSet<u64> = (5..10).collect();
        let scores = precision_recall(&reference, &test);
        assert_eq!(scores.precision, 0.0);
        assert_eq!(scores.recall, 0.0);
    }

    #[test]
    fn empty_denominators_are_nan() {
        let empty = BTreeSet::<u64>::new();
        let full: BTreeSet<u64> = [1].into();
        assert!(precision_recall(&full, &empty).precision.is_nan());
        assert!(precision_recall(&empty, &full).recall.is_nan());
    }

    #[test]
    fn top_k_orders_by_value_then_key() {
        let values: BTreeMap<u64, f64> =
            [(1, 0.5), (2, 0.9), (3, 0.5), (4, f64::NAN), (5, 0.1)].into();
        assert_eq!(top_k(&values, 2), BTreeSet::from([1, 2]));
        assert_eq!(top_k(&values, 10), BTreeSet::from([1, 2, 3, 5]));
        assert!(top_k(&values, 0).is_empty());
    }
}

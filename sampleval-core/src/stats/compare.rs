//! One-call comparison of a sample's metric map against the population's.

use std::collections::BTreeMap;

use crate::{error::StatsError, metrics::MetricMap};

use super::{
    correlation::{kendall_tau, pearson, spearman},
    divergence::kl_divergence,
    ks::{ks_p_value, ks_test},
    precision_recall::{precision_recall, top_k},
    rank::RANK_TIE_TOLERANCE,
};

/// Every statistic computed for one (population, sample) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricComparison {
    /// Sample vertices aligned with population values.
    pub vertices: usize,
    /// Pearson correlation of aligned values.
    pub pearson: f64,
    /// Spearman correlation of aligned values.
    pub spearman: f64,
    /// Kendall's tau-b of aligned values.
    pub kendall_tau: f64,
    /// KS distance between the population and sample value distributions.
    pub ks_statistic: f64,
    /// Asymptotic p-value of [`MetricComparison::ks_statistic`]; `NaN` when
    /// the distance is a non-finite sentinel.
    pub ks_p_value: f64,
    /// Share of the sample's top-K vertices that are population top-K.
    pub precision: f64,
    /// Share of the population's top-K vertices found in the sample's top-K.
    pub recall: f64,
    /// KL divergence of the sample's value histogram from the population's.
    pub kl_divergence: f64,
}

impl MetricComparison {
    /// Report column names, in the order of [`MetricComparison::values`].
    pub const COLUMN_NAMES: [&'static str; 9] = [
        "vertices",
        "pearson",
        "spearman",
        "kendall_tau",
        "ks_statistic",
        "ks_p_value",
        "precision",
        "recall",
        "kl_divergence",
    ];

    /// Field values in [`MetricComparison::COLUMN_NAMES`] order.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "vertex counts are reported as numbers")]
    pub fn values(&self) -> [f64; 9] {
        [
            self.vertices as f64,
            self.pearson,
            self.spearman,
            self.kendall_tau,
            self.ks_statistic,
            self.ks_p_value,
            self.precision,
            self.recall,
            self.kl_divergence,
        ]
    }
}

/// Compares `sample` metric values against `population` values.
///
/// Correlations use the sample's vertices paired with their population
/// values. The KS distance, its p-value and the KL divergence compare the
/// full population distribution with the sample distribution. Precision and recall compare
/// the top `ceil(top_k_fraction × len)` vertices of each map.
///
/// # Errors
/// Returns [`StatsError::InvalidTopKFraction`] unless `top_k_fraction` lies
/// in `(0, 1]`, and [`StatsError::MissingPopulationValue`] when a sample
/// vertex has no population value.
///
/// # Examples
/// ```
/// use sampleval_core::{MetricMap, VertexId, stats::compare_metric_maps};
///
/// let population: MetricMap = (0..10).map(|id| (VertexId::new(id), id as f64)).collect();
/// let sample: MetricMap = (0..5).map(|id| (VertexId::new(id * 2), id as f64)).collect();
/// let comparison = compare_metric_maps(&population, &sample, 0.2).expect("aligned maps");
/// assert_eq!(comparison.vertices, 5);
/// assert!((comparison.spearman - 1.0).abs() < 1e-12);
/// ```
pub fn compare_metric_maps(
    population: &MetricMap,
    sample: &MetricMap,
    top_k_fraction: f64,
) -> Result<MetricComparison, StatsError> {
    if !(top_k_fraction > 0.0 && top_k_fraction <= 1.0) {
        return Err(StatsError::InvalidTopKFraction {
            got: top_k_fraction,
        });
    }
    let mut aligned_population = Vec::with_capacity(sample.len());
    let mut aligned_sample = Vec::with_capacity(sample.len());
    for (&vertex, &value) in sample {
        let population_value = population
            .get(&vertex)
            .ok_or(StatsError::MissingPopulationValue { vertex })?;
        aligned_population.push(*population_value);
        aligned_sample.push(value);
    }

    let population_values: Vec<f64> = population.values().copied().collect();
    let scores = precision_recall(
        &top_k(population, top_k_size(top_k_fraction, population.len())),
        &top_k(sample, top_k_size(top_k_fraction, sample.len())),
    );

    let ks_statistic = ks_test(&population_values, &aligned_sample);

    Ok(MetricComparison {
        vertices: aligned_sample.len(),
        pearson: pearson(&aligned_population, &aligned_sample)?,
        spearman: spearman(&aligned_population, &aligned_sample)?,
        kendall_tau: kendall_tau(&aligned_population, &aligned_sample)?,
        ks_statistic,
        ks_p_value: ks_p_value(ks_statistic, population_values.len(), aligned_sample.len()),
        precision: scores.precision,
        recall: scores.recall,
        kl_divergence: kl_divergence(&value_histogram(sample), &value_histogram(population)),
    })
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_arithmetic,
    reason = "top-K sizes derive from a fraction"
)]
fn top_k_size(fraction: f64, len: usize) -> usize {
    ((fraction * len as f64).ceil() as usize).min(len)
}

/// Counts finite values per bin of width [`RANK_TIE_TOLERANCE`].
#[expect(
    clippy::cast_possible_truncation,
    clippy::float_arithmetic,
    reason = "values are binned by rounding"
)]
fn value_histogram(map: &MetricMap) -> BTreeMap<i64, f64> {
    let mut histogram = BTreeMap::new();
    for value in map.values().filter(|value| value.is_finite()) {
        *histogram
            .entry((value / RANK_TIE_TOLERANCE).round() as i64)
            .or_insert(0.0) += 1.0;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;
    use rstest::rstest;

    fn map(entries: &[(u64, f64)]) -> MetricMap {
        entries
            .iter()
            .map(|&(id, value)| (VertexId::new(id), value))
            .collect()
    }

    #[test]
    fn a_full_sample_matches_the_population() {
        let population = map(&[(0, 3.0), (1, 1.0), (2, 4.0), (3, 1.5), (4, 9.0)]);
        let comparison = compare_metric_maps(&population, &population, 0.4).expect("aligned");
        assert_eq!(comparison.vertices, 5);
        assert!((comparison.pearson - 1.0).abs() < 1e-12);
        assert!((comparison.spearman - 1.0).abs() < 1e-12);
        assert!((comparison.kendall_tau - 1.0).abs() < 1e-12);
        assert_eq!(comparison.ks_statistic, 0.0);
        assert_eq!(comparison.ks_p_value, 1.0);
        assert_eq!(comparison.precision, 1.0);
        assert_eq!(comparison.recall, 1.0);
        assert_eq!(comparison.kl_divergence, 0.0);
    }

    #[test]
    fn unknown_sample_vertices_are_rejected() {
        let population = map(&[(0, 1.0), (1, 2.0)]);
        let sample = map(&[(7, 1.0)]);
        let err = compare_metric_maps(&population, &sample, 0.5).expect_err("vertex 7 is unknown");
        assert_eq!(
            err,
            StatsError::MissingPopulationValue {
                vertex: VertexId::new(7)
            }
        );
        assert_eq!(err.code().as_str(), "STATS_MISSING_POPULATION_VALUE");
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn top_k_fraction_must_be_a_fraction(#[case] fraction: f64) {
        let population = map(&[(0, 1.0)]);
        assert!(matches!(
            compare_metric_maps(&population, &population, fraction),
            Err(StatsError::InvalidTopKFraction { .. })
        ));
    }

    #[test]
    fn single_vertex_samples_report_sentinels() {
        let population = map(&[(0, 1.0), (1, 2.0), (2, 3.0)]);
        let sample = map(&[(1, 5.0)]);
        let comparison = compare_metric_maps(&population, &sample, 1.0).expect("aligned");
        // One observation per side counts as two constant series.
        assert_eq!(comparison.pearson, 0.0);
        assert_eq!(comparison.spearman, 1.0);
        assert_eq!(comparison.kendall_tau, crate::stats::KENDALL_UNDEFINED);
        assert!(comparison.ks_statistic.is_nan());
        assert!(comparison.ks_p_value.is_nan());
        assert_eq!(comparison.precision, 1.0);
        assert!((comparison.recall - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_distributions_have_a_small_ks_p_value() {
        let population: MetricMap = (0..40)
            .map(|id| (VertexId::new(id), if id < 20 { 0.0 } else { 1.0 }))
            .collect();
        let sample: MetricMap = (20..40).map(|id| (VertexId::new(id), 1.0)).collect();
        let comparison = compare_metric_maps(&population, &sample, 0.5).expect("aligned");
        assert_eq!(comparison.ks_statistic, 0.5);
        assert!(comparison.ks_p_value < 0.05, "p = {}", comparison.ks_p_value);
        assert_eq!(
            comparison.ks_p_value,
            ks_p_value(comparison.ks_statistic, 40, 20)
        );
    }

    #[test]
    fn column_names_line_up_with_values() {
        let population = map(&[(0, 1.0), (1, 2.0)]);
        let comparison = compare_metric_maps(&population, &population, 1.0).expect("aligned");
        let values = comparison.values();
        assert_eq!(MetricComparison::COLUMN_NAMES.len(), values.len());
        assert_eq!(values[0], 2.0);
        assert_eq!(MetricComparison::COLUMN_NAMES[5], "ks_p_value");
        assert_eq!(MetricComparison::COLUMN_NAMES[8], "kl_divergence");
    }
}

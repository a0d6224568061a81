//! Property tests for the statistics engine.

use std::collections::{BTreeMap, BTreeSet};

use proptest::{
    collection::{btree_map, btree_set, vec},
    prop_assert, prop_assert_eq, prop_assume, proptest,
};

use super::*;
use crate::test_utils::suite_proptest_config;

fn distinct(series: &[f64]) -> bool {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if (b - a).abs() >= RANK_TIE_TOLERANCE))
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn pearson_of_a_series_with_itself_is_one(series in vec(-1e3_f64..1e3, 2..64)) {
        prop_assume!(distinct(&series));
        let r = pearson(&series, &series).expect("equal lengths");
        prop_assert!((r - 1.0).abs() < 1e-9, "r = {r}");
    }

    #[test]
    fn pearson_ignores_positive_affine_maps(
        series in vec(-1e3_f64..1e3, 2..64),
        scale in 0.01_f64..100.0,
        shift in -1e3_f64..1e3,
    ) {
        prop_assume!(distinct(&series));
        let mapped: Vec<f64> = series.iter().map(|value| value * scale + shift).collect();
        let r = pearson(&series, &mapped).expect("equal lengths");
        prop_assert!((r - 1.0).abs() < 1e-9, "r = {r}");
    }

    #[test]
    fn spearman_ignores_strictly_increasing_maps(
        x in vec(-50.0_f64..50.0, 2..48),
        y in vec(-50.0_f64..50.0, 48),
    ) {
        prop_assume!(distinct(&x));
        let y = &y[..x.len()];
        prop_assume!(distinct(y));
        let baseline = spearman(&x, y).expect("equal lengths");
        let transformed: Vec<f64> = x.iter().map(|value| value.powi(3) + 2.0 * value).collect();
        prop_assume!(distinct(&transformed));
        let r = spearman(&transformed, y).expect("equal lengths");
        prop_assert!((r - baseline).abs() < 1e-9, "{r} != {baseline}");
    }

    #[test]
    fn kendall_tau_is_bounded_or_undefined(
        pairs in vec((0_u8..6, 0_u8..6), 0..40),
    ) {
        let x: Vec<f64> = pairs.iter().map(|&(a, _)| f64::from(a)).collect();
        let y: Vec<f64> = pairs.iter().map(|&(_, b)| f64::from(b)).collect();
        let tau = kendall_tau(&x, &y).expect("equal lengths");
        prop_assert!(tau == KENDALL_UNDEFINED || (-1.0..=1.0).contains(&tau));
    }

    #[test]
    fn identical_sets_have_perfect_precision_and_recall(set in btree_set(0_u64..1_000, 1..32)) {
        let scores = precision_recall(&set, &set);
        prop_assert_eq!(scores.precision, 1.0);
        prop_assert_eq!(scores.recall, 1.0);
    }

    #[test]
    fn identical_maps_have_zero_divergence(map in btree_map(0_u64..100, 0.1_f64..50.0, 1..32)) {
        prop_assert_eq!(kl_divergence(&map, &map), 0.0);
    }

    #[test]
    fn ks_distance_is_a_fraction(
        x in vec(-10.0_f64..10.0, 2..40),
        y in vec(-10.0_f64..10.0, 2..40),
    ) {
        let d = ks_test(&x, &y);
        prop_assert!((0.0..=1.0).contains(&d), "d = {d}");
        prop_assert_eq!(ks_test(&x, &x), 0.0);
    }
}

#[test]
fn ks_scenarios() {
    let series = [0.0, 1.0, 2.0, 10.0, 2.2, 3.3, 6.0];
    let mut sorted = series;
    sorted.sort_by(f64::total_cmp);
    assert_eq!(ks_test(&series, &sorted), 0.0);
    assert_ne!(ks_test(&series, &[0.0, 1.0, 2.0, 10.0, 2.2, 3.3, 5.0]), 0.0);
}

#[test]
fn disjoint_five_element_sets_have_no_overlap() {
    let reference: BTreeSet<u64> = (0..5).collect();
    let test: BTreeSet<u64> = (10..15).collect();
    let scores = precision_recall(&reference, &test);
    assert_eq!((scores.precision, scores.recall), (0.0, 0.0));
}

#[test]
fn top_k_feeds_precision_recall() {
    let reference: BTreeMap<u64, f64> = (0..10).map(|id| (id, f64::from(id as u8))).collect();
    let test: BTreeMap<u64, f64> = (0..10).map(|id| (id, -f64::from(id as u8))).collect();
    let scores = precision_recall(&top_k(&reference, 3), &top_k(&test, 3));
    assert_eq!(scores.precision, 0.0);
    assert_eq!(top_k(&reference, 3), BTreeSet::from([7, 8, 9]));
}

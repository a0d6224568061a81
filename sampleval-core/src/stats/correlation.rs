//! Pearson, Spearman and Kendall correlation coefficients.

use crate::error::StatsError;

use super::rank::average_ranks;

/// Returned by [`kendall_tau`] when the tie-adjusted denominator is zero.
pub const KENDALL_UNDEFINED: f64 = -999.0;

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), StatsError> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(StatsError::DimensionMismatch {
            left: x.len(),
            right: y.len(),
        })
    }
}

/// Value returned when both series are constant but at different levels.
#[derive(Clone, Copy)]
enum UnequalConstants {
    Zero,
    NotANumber,
}

/// Pearson product-moment correlation.
///
/// Degenerate inputs never fail:
///
/// | x constant | y constant | result |
/// |---|---|---|
/// | yes | yes | `1` if the constants match, else `0` |
/// | yes | no  | `NaN` |
/// | no  | yes | `NaN` |
///
/// Empty input yields `NaN`.
///
/// # Errors
/// Returns [`StatsError::DimensionMismatch`] when the lengths differ.
///
/// # Examples
/// ```
/// use sampleval_core::stats::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.5]).expect("equal lengths");
/// assert!(r > 0.99);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;
    Ok(product_moment(x, y, UnequalConstants::Zero))
}

/// Spearman rank correlation over tie-aware average ranks.
///
/// Uses the Pearson table on the rank series, except that two constant
/// series at different levels yield `NaN` rather than `0`.
///
/// # Errors
/// Returns [`StatsError::DimensionMismatch`] when the lengths differ.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;
    Ok(product_moment(
        &average_ranks(x),
        &average_ranks(y),
        UnequalConstants::NotANumber,
    ))
}

fn constant_level(series: &[f64]) -> Option<f64> {
    let (&first, rest) = series.split_first()?;
    rest.iter().all(|&value| value == first).then_some(first)
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "correlation requires floating-point moments"
)]
fn product_moment(x: &[f64], y: &[f64], unequal: UnequalConstants) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    match (constant_level(x), constant_level(y)) {
        (Some(a), Some(b)) if a == b => return 1.0,
        (Some(_), Some(_)) => {
            return match unequal {
                UnequalConstants::Zero => 0.0,
                UnequalConstants::NotANumber => f64::NAN,
            };
        }
        (Some(_), None) | (None, Some(_)) => return f64::NAN,
        (None, None) => {}
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (covariance / denominator).clamp(-1.0, 1.0)
}

/// Kendall's tau-b, computed with Knight's `O(n log n)` merge-sort scheme.
///
/// Returns [`KENDALL_UNDEFINED`] when either series is entirely tied or has
/// fewer than two elements.
///
/// # Errors
/// Returns [`StatsError::DimensionMismatch`] when the lengths differ.
///
/// # Examples
/// ```
/// use sampleval_core::stats::{KENDALL_UNDEFINED, kendall_tau};
///
/// assert_eq!(kendall_tau(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), Ok(-1.0));
/// assert_eq!(kendall_tau(&[1.0, 1.0], &[1.0, 2.0]), Ok(KENDALL_UNDEFINED));
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "tau-b combines pair counts"
)]
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;
    let n = x.len() as u64;
    let total_pairs = n * n.saturating_sub(1) / 2;

    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let x_ties = tied_pairs(&pairs, |a, b| a.0 == b.0);
    let joint_ties = tied_pairs(&pairs, |a, b| a.0 == b.0 && a.1 == b.1);

    let mut ys: Vec<f64> = pairs.iter().map(|pair| pair.1).collect();
    let mut buffer = Vec::with_capacity(ys.len());
    let swaps = sort_counting_swaps(&mut ys, &mut buffer);
    let y_ties = tied_runs(&ys);

    let denominator = ((total_pairs - x_ties) as f64 * (total_pairs - y_ties) as f64).sqrt();
    if denominator == 0.0 {
        return Ok(KENDALL_UNDEFINED);
    }
    let numerator = total_pairs as f64 - x_ties as f64 - y_ties as f64 + joint_ties as f64
        - 2.0 * swaps as f64;
    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

/// Counts pairs inside runs of consecutive elements that `same` groups.
fn tied_pairs<T>(sorted: &[T], same: impl Fn(&T, &T) -> bool) -> u64 {
    let mut total = 0;
    let mut run = 1_u64;
    for window in sorted.windows(2) {
        if let [a, b] = window {
            if same(a, b) {
                run += 1;
                continue;
            }
        }
        total += run * (run - 1) / 2;
        run = 1;
    }
    total + run * run.saturating_sub(1) / 2
}

fn tied_runs(sorted: &[f64]) -> u64 {
    tied_pairs(sorted, |a, b| a == b)
}

/// Merge-sorts `values`, returning the number of inversions removed.
fn sort_counting_swaps(values: &mut [f64], buffer: &mut Vec<f64>) -> u64 {
    if values.len() < 2 {
        return 0;
    }
    let middle = values.len() / 2;
    let (left, right) = values.split_at_mut(middle);
    let mut swaps = sort_counting_swaps(left, buffer) + sort_counting_swaps(right, buffer);

    buffer.clear();
    let (mut i, mut j) = (0, 0);
    while let (Some(&a), Some(&b)) = (left.get(i), right.get(j)) {
        if b < a {
            swaps += (left.len() - i) as u64;
            buffer.push(b);
            j += 1;
        } else {
            buffer.push(a);
            i += 1;
        }
    }
    buffer.extend(left.iter().skip(i));
    buffer.extend(right.iter().skip(j));
    values.copy_from_slice(buffer);
    swaps
}

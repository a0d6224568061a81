//! Tie-aware average ranks.

/// Values closer than this share one averaged rank.
pub const RANK_TIE_TOLERANCE: f64 = 1e-4;

/// Assigns every element of `series` its 1-based average rank.
///
/// Each value is located in a sorted copy by binary search; the match is
/// widened left and right while neighbours lie within
/// [`RANK_TIE_TOLERANCE`], and the rank is the midpoint of that span plus
/// one.
///
/// # Examples
/// ```
/// use sampleval_core::stats::average_ranks;
///
/// assert_eq!(average_ranks(&[3.0, 1.0, 3.00001, 2.0]), vec![3.5, 1.0, 3.5, 2.0]);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "ranks are averaged positions"
)]
pub fn average_ranks(series: &[f64]) -> Vec<f64> {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    series
        .iter()
        .map(|&value| {
            let (left, right) = tie_span(&sorted, value);
            (left + right) as f64 / 2.0 + 1.0
        })
        .collect()
}

#[expect(clippy::float_arithmetic, reason = "tie tolerance comparison")]
fn tie_span(sorted: &[f64], value: f64) -> (usize, usize) {
    let found = match sorted.binary_search_by(|probe| probe.total_cmp(&value)) {
        Ok(index) => index,
        // Only reachable for values missing from `sorted`, which the caller
        // never passes.
        Err(index) => index.min(sorted.len().saturating_sub(1)),
    };
    let within = |index: usize| {
        sorted
            .get(index)
            .is_some_and(|&probe| (probe - value).abs() < RANK_TIE_TOLERANCE)
    };
    let mut left = found;
    while left > 0 && within(left - 1) {
        left -= 1;
    }
    let mut right = found;
    while within(right + 1) {
        right += 1;
    }
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], &[])]
    #[case(&[5.0], &[1.0])]
    #[case(&[10.0, 20.0, 30.0], &[1.0, 2.0, 3.0])]
    #[case(&[2.0, 2.0, 2.0], &[2.0, 2.0, 2.0])]
    #[case(&[1.0, 4.0, 4.0, 0.5], &[2.0, 3.5, 3.5, 1.0])]
    fn ranks_average_ties(#[case] series: &[f64], #[case] expected: &[f64]) {
        assert_eq!(average_ranks(series), expected);
    }

    #[test]
    fn near_ties_within_tolerance_share_a_rank() {
        let ranks = average_ranks(&[1.0, 1.00005, 1.0002]);
        assert_eq!(ranks, vec![1.5, 1.5, 3.0]);
    }
}

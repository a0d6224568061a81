//! Two-sample Kolmogorov–Smirnov distance.
//!
//! [`ks_statistic`] reports numerical trouble as a [`KsFailure`];
//! [`ks_test`] maps every failure to a fixed sentinel so comparison reports
//! always carry a number.

use thiserror::Error;
use tracing::debug;

use crate::error::define_error_codes;

/// Distances below this are treated as floating-point noise.
pub const KS_UNDERFLOW_THRESHOLD: f64 = 1e-12;

/// Why a KS statistic could not be computed.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum KsFailure {
    /// A series held a NaN.
    #[error("series contains NaN")]
    NotANumber,
    /// A series held negative infinity.
    #[error("series contains negative infinity")]
    NegativeInfinity,
    /// A series held positive infinity.
    #[error("series contains positive infinity")]
    PositiveInfinity,
    /// The distance was positive but indistinguishable from rounding noise.
    #[error("statistic underflowed")]
    Underflow,
    /// A series had fewer than two observations.
    #[error("series too short: left={left}, right={right}")]
    InsufficientData {
        /// Length of the left-hand series.
        left: usize,
        /// Length of the right-hand series.
        right: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`KsFailure`] variants.
    enum KsFailureCode for KsFailure {
        /// A series held a NaN.
        NotANumber => NotANumber => "KS_NOT_A_NUMBER",
        /// A series held negative infinity.
        NegativeInfinity => NegativeInfinity => "KS_NEGATIVE_INFINITY",
        /// A series held positive infinity.
        PositiveInfinity => PositiveInfinity => "KS_POSITIVE_INFINITY",
        /// The distance underflowed.
        Underflow => Underflow => "KS_UNDERFLOW",
        /// A series had fewer than two observations.
        InsufficientData => InsufficientData { .. } => "KS_INSUFFICIENT_DATA",
    }
}

impl KsFailure {
    /// Value [`ks_test`] reports in place of the statistic.
    #[must_use]
    pub const fn sentinel(self) -> f64 {
        match self {
            Self::Underflow => 0.0,
            Self::NegativeInfinity => f64::NEG_INFINITY,
            Self::PositiveInfinity => f64::INFINITY,
            Self::NotANumber | Self::InsufficientData { .. } => f64::NAN,
        }
    }
}

/// Largest gap between the empirical distribution functions of `x` and `y`.
///
/// # Errors
/// Returns a [`KsFailure`] when either series is shorter than two elements,
/// holds a non-finite value, or the distance underflows.
///
/// # Examples
/// ```
/// use sampleval_core::stats::ks_statistic;
///
/// let series = [0.0, 1.0, 2.0, 10.0, 2.2, 3.3, 6.0];
/// let mut sorted = series;
/// sorted.sort_by(f64::total_cmp);
/// assert_eq!(ks_statistic(&series, &sorted), Ok(0.0));
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "empirical distribution functions are fractions"
)]
pub fn ks_statistic(x: &[f64], y: &[f64]) -> Result<f64, KsFailure> {
    if x.len() < 2 || y.len() < 2 {
        return Err(KsFailure::InsufficientData {
            left: x.len(),
            right: y.len(),
        });
    }
    let values = || x.iter().chain(y);
    if values().any(|value| value.is_nan()) {
        return Err(KsFailure::NotANumber);
    }
    if values().any(|&value| value == f64::NEG_INFINITY) {
        return Err(KsFailure::NegativeInfinity);
    }
    if values().any(|&value| value == f64::INFINITY) {
        return Err(KsFailure::PositiveInfinity);
    }

    let mut left = x.to_vec();
    let mut right = y.to_vec();
    left.sort_by(f64::total_cmp);
    right.sort_by(f64::total_cmp);
    let (n, m) = (left.len() as f64, right.len() as f64);

    let (mut i, mut j) = (0, 0);
    let mut distance = 0.0_f64;
    while let (Some(&a), Some(&b)) = (left.get(i), right.get(j)) {
        let step = a.min(b);
        while left.get(i).is_some_and(|&value| value <= step) {
            i += 1;
        }
        while right.get(j).is_some_and(|&value| value <= step) {
            j += 1;
        }
        distance = distance.max((i as f64 / n - j as f64 / m).abs());
    }

    if distance > 0.0 && distance < KS_UNDERFLOW_THRESHOLD {
        return Err(KsFailure::Underflow);
    }
    Ok(distance)
}

/// [`ks_statistic`] with failures replaced by [`KsFailure::sentinel`].
#[must_use]
pub fn ks_test(x: &[f64], y: &[f64]) -> f64 {
    ks_statistic(x, y).unwrap_or_else(|failure| {
        debug!(
            code = %failure.code(),
            left = x.len(),
            right = y.len(),
            "ks statistic unavailable; using sentinel"
        );
        failure.sentinel()
    })
}

const KOLMOGOROV_TERMS: u32 = 100;
const KOLMOGOROV_EPS1: f64 = 1e-3;
const KOLMOGOROV_EPS2: f64 = 1e-8;

/// Asymptotic p-value of distance `d` between samples of sizes `n` and `m`.
///
/// Uses the Kolmogorov series with Stephens' small-sample correction.
/// Returns `NaN` for a non-finite distance or an empty sample.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "series evaluation"
)]
pub fn ks_p_value(d: f64, n: usize, m: usize) -> f64 {
    if !d.is_finite() || n == 0 || m == 0 {
        return f64::NAN;
    }
    let (n, m) = (n as f64, m as f64);
    let effective = (n * m / (n + m)).sqrt();
    let lambda = (effective + 0.12 + 0.11 / effective) * d;
    let exponent = -2.0 * lambda * lambda;

    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous_term = 0.0_f64;
    for j in 1..=KOLMOGOROV_TERMS {
        let j = f64::from(j);
        let term = sign * (exponent * j * j).exp();
        sum += term;
        if term.abs() <= KOLMOGOROV_EPS1 * previous_term || term.abs() <= KOLMOGOROV_EPS2 * sum {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        previous_term = term.abs();
    }
    // The series failed to converge, which only happens as d approaches 0.
    1.0
}

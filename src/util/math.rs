//! Exact-integer correlation helpers.
//!
//! Window and template statistics are accumulated as integers so the only
//! rounding happens in the final ratio. Variances are kept scaled by the
//! pixel count (`n * sum_sq - sum^2`) to stay in integer arithmetic.

/// Score assigned to placements where the correlation is undefined.
pub const DEGENERATE_SCORE: f32 = -1.0;

/// Returns `n * sum_sq - sum^2`, the variance scaled by `n^2`.
#[inline]
pub(crate) fn scaled_variance(n: u64, sum: u64, sum_sq: u64) -> u128 {
    let lhs = u128::from(n) * u128::from(sum_sq);
    let rhs = u128::from(sum) * u128::from(sum);
    lhs.saturating_sub(rhs)
}

/// Returns `n * dot - sum_a * sum_b`, the covariance scaled by `n^2`.
#[inline]
pub(crate) fn scaled_covariance(n: u64, dot: u64, sum_a: u64, sum_b: u64) -> i128 {
    let lhs = i128::from(n) * i128::from(dot);
    let rhs = i128::from(sum_a) * i128::from(sum_b);
    lhs - rhs
}

/// Computes `num / sqrt(a * b)` clamped to `[-1, 1]`.
///
/// Returns [`DEGENERATE_SCORE`] when either energy term is zero.
#[inline]
pub(crate) fn normalized_ratio(num: f64, energy_a: u128, energy_b: u128) -> f32 {
    if energy_a == 0 || energy_b == 0 {
        return DEGENERATE_SCORE;
    }
    let denom = (energy_a as f64).sqrt() * (energy_b as f64).sqrt();
    let score = num / denom;
    if !score.is_finite() {
        return DEGENERATE_SCORE;
    }
    score.clamp(-1.0, 1.0) as f32
}
